//! Static structured-output schemas, one per platform.
//!
//! The model is asked for `{"Entry": [<record>, ...]}` in strict mode, so
//! every response either decodes into the matching record vector or fails
//! loudly. Derived columns (the Instagram image path) are deliberately
//! absent: the model never chooses file locations.

use serde_json::{json, Value};

use crate::records::Platform;

/// Name advertised for the response schema.
pub const SCHEMA_NAME: &str = "gen_data";

/// Build the strict JSON schema for one platform's record batch.
#[must_use]
pub fn response_schema(platform: Platform) -> Value {
    json!({
        "type": "object",
        "properties": {
            "Entry": {
                "type": "array",
                "items": record_schema(platform),
            }
        },
        "required": ["Entry"],
        "additionalProperties": false,
    })
}

fn record_schema(platform: Platform) -> Value {
    match platform {
        Platform::Reddit => object_schema(&[
            ("Type", "string"),
            ("Username", "string"),
            ("Upvotes", "string"),
            ("Time", "string"),
            ("Content", "string"),
        ]),
        Platform::Twitter => object_schema(&[
            ("Username", "string"),
            ("Handle", "string"),
            ("Time", "string"),
            ("Content", "string"),
            ("Replies", "string"),
            ("Retweets", "string"),
            ("Likes", "string"),
            ("Views", "string"),
        ]),
        Platform::Instagram => object_schema(&[
            ("Username", "string"),
            ("ImagePrompt", "string"),
            ("Caption", "string"),
            ("Likes", "integer"),
            ("CommentCount", "integer"),
            ("Time", "string"),
        ]),
        Platform::Facebook => object_schema(&[
            ("Name", "string"),
            ("Type", "string"),
            ("Time", "string"),
            ("Text", "string"),
            ("Likes", "string"),
        ]),
    }
}

fn object_schema(fields: &[(&str, &str)]) -> Value {
    let properties: serde_json::Map<String, Value> = fields
        .iter()
        .map(|(name, ty)| ((*name).to_string(), json!({ "type": ty })))
        .collect();
    let required: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}
