//! OpenAI API client.
//!
//! One structured chat-completions request per run produces the record set;
//! the Instagram flow additionally issues one image-generation request per
//! post. The client is constructed explicitly from [`Config`] and passed to
//! callers, never held as a process-wide singleton.

pub mod schema;

use std::time::Duration;

use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::records::{FacebookEntry, InstaPost, Platform, RecordSet, RedditComment, Tweet};

/// Fixed instruction prefixed to every image prompt.
const IMAGE_SIZE_INSTRUCTION: &str = "Ensure that all generated images are 600px by 600px.";

const HTTP_TIMEOUT: Duration = Duration::from_secs(180);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("missing OpenAI API key")]
    MissingApiKey,
    #[error("invalid API key header: {0}")]
    InvalidHeader(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("model returned no content")]
    EmptyResponse,
    #[error("model output failed schema decode: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to decode image payload: {0}")]
    ImagePayload(#[from] base64::DecodeError),
}

/// Batch wrapper matching the structured-output schema.
#[derive(Debug, Deserialize)]
struct Batch<T> {
    #[serde(rename = "Entry")]
    entry: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    b64_json: Option<String>,
}

/// OpenAI API client for structured generation and image synthesis.
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    model: String,
    image_model: String,
}

impl OpenAiClient {
    /// Create a new client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or not header-safe, or if
    /// the underlying HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        let api_key = config
            .openai_api_key
            .as_deref()
            .ok_or(LlmError::MissingApiKey)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|e| LlmError::InvalidHeader(e.to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(HTTP_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            model: config.model_name.clone(),
            image_model: config.image_model_name.clone(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    async fn check_response(response: Response) -> Result<Response, LlmError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        // Prefer the API's own error message when the body is JSON
        let message = serde_json::from_str::<serde_json::Value>(&message)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(String::from))
            .unwrap_or(message);

        Err(LlmError::Api { status, message })
    }

    /// Request one batch of records for the selected platform.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response does not decode
    /// into the platform's record shape.
    pub async fn generate_records(
        &self,
        platform: Platform,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<RecordSet, LlmError> {
        debug!(model = %self.model, platform = ?platform, "Requesting structured records");

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_prompt },
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": schema::SCHEMA_NAME,
                    "strict": true,
                    "schema": schema::response_schema(platform),
                }
            },
        });

        let response = self
            .client
            .post(self.url("/chat/completions"))
            .json(&body)
            .send()
            .await?;
        let response = Self::check_response(response).await?;

        let completion: ChatCompletionResponse = response.json().await?;
        let content = completion
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or(LlmError::EmptyResponse)?;

        let records = match platform {
            Platform::Reddit => RecordSet::Reddit(decode_batch::<RedditComment>(&content)?),
            Platform::Twitter => RecordSet::Twitter(decode_batch::<Tweet>(&content)?),
            Platform::Instagram => RecordSet::Instagram(decode_batch::<InstaPost>(&content)?),
            Platform::Facebook => RecordSet::Facebook(decode_batch::<FacebookEntry>(&content)?),
        };
        debug!(rows = records.len(), "Structured records decoded");
        Ok(records)
    }

    /// Request one generated image for an Instagram post prompt.
    ///
    /// Returns `Ok(None)` when the API responds successfully but carries no
    /// image payload; the caller treats that row as "skip".
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is not valid
    /// base64.
    pub async fn generate_image(&self, image_prompt: &str) -> Result<Option<Vec<u8>>, LlmError> {
        debug!(model = %self.image_model, "Requesting post image");

        let body = json!({
            "model": self.image_model,
            "prompt": format!("{IMAGE_SIZE_INSTRUCTION} {image_prompt}"),
            "n": 1,
        });

        let response = self
            .client
            .post(self.url("/images/generations"))
            .json(&body)
            .send()
            .await?;
        let response = Self::check_response(response).await?;

        let images: ImagesResponse = response.json().await?;
        let Some(encoded) = images.data.into_iter().find_map(|d| d.b64_json) else {
            return Ok(None);
        };

        let bytes = base64::engine::general_purpose::STANDARD.decode(encoded)?;
        Ok(Some(bytes))
    }
}

fn decode_batch<T: serde::de::DeserializeOwned>(content: &str) -> Result<Vec<T>, LlmError> {
    let batch: Batch<T> = serde_json::from_str(content).map_err(LlmError::Decode)?;
    Ok(batch.entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_batch_reddit() {
        let content = r#"{"Entry":[
            {"Type":"top","Username":"alice","Upvotes":"1.2k","Time":"4h","Content":"hi"},
            {"Type":"comment","Username":"bob","Upvotes":"56","Time":"3h","Content":"hey"}
        ]}"#;
        let rows: Vec<RedditComment> = decode_batch(content).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_top_level());
        assert_eq!(rows[1].username, "bob");
    }

    #[test]
    fn test_decode_batch_rejects_wrong_shape() {
        let content = r#"{"Posts":[]}"#;
        let result: Result<Vec<Tweet>, _> = decode_batch(content);
        assert!(matches!(result, Err(LlmError::Decode(_))));
    }

    #[test]
    fn test_decode_batch_rejects_non_numeric_counts() {
        // Likes must be an integer for Instagram; "many" is a decode error.
        let content = r#"{"Entry":[
            {"Username":"u","ImagePrompt":"p","Caption":"c","Likes":"many","CommentCount":0,"Time":"1h"}
        ]}"#;
        let result: Result<Vec<InstaPost>, _> = decode_batch(content);
        assert!(matches!(result, Err(LlmError::Decode(_))));
    }
}
