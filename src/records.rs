//! Record shapes for each supported platform.
//!
//! Every platform defines a fixed-shape row (a "post unit"). Field names are
//! serialized in PascalCase so the CSV columns and the structured-output
//! schema match what a human editing the CSV expects to see.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The platforms a record set can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Platform {
    Reddit,
    Twitter,
    Instagram,
    Facebook,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Reddit,
        Platform::Twitter,
        Platform::Instagram,
        Platform::Facebook,
    ];

    /// Human-readable label used in menus and messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Platform::Reddit => "Reddit comment thread",
            Platform::Twitter => "Twitter/X thread",
            Platform::Instagram => "Instagram posts",
            Platform::Facebook => "Facebook post and comments",
        }
    }

    /// File name of the system-prompt template for this platform.
    #[must_use]
    pub fn prompt_file(self) -> &'static str {
        match self {
            Platform::Reddit => "reddit_prompt.txt",
            Platform::Twitter => "twitter_prompt.txt",
            Platform::Instagram => "instagram_prompt.txt",
            Platform::Facebook => "facebook_prompt.txt",
        }
    }

    /// Message printed after a successful render.
    #[must_use]
    pub fn completion_message(self) -> &'static str {
        match self {
            Platform::Reddit => "Reddit comment chain generated.",
            Platform::Twitter => "Twitter thread generated.",
            Platform::Instagram => "Instagram post generated.",
            Platform::Facebook => "Facebook post generated.",
        }
    }
}

/// One Reddit comment. `Type == "top"` starts a new thread-level box; any
/// other value renders as an indented reply under the preceding top comment.
/// Upvotes and Time are opaque display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedditComment {
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Upvotes")]
    pub upvotes: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Content")]
    pub content: String,
}

impl RedditComment {
    /// Whether this comment opens a new top-level post box.
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.kind == "top"
    }
}

/// One tweet. All count fields are opaque strings, rendered as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Handle")]
    pub handle: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Content")]
    pub content: String,
    #[serde(rename = "Replies")]
    pub replies: String,
    #[serde(rename = "Retweets")]
    pub retweets: String,
    #[serde(rename = "Likes")]
    pub likes: String,
    #[serde(rename = "Views")]
    pub views: String,
}

/// One Instagram post. Likes and CommentCount are genuine integers; a
/// non-numeric value is rejected at decode time rather than at render time.
///
/// `FilePath` is a derived column (never requested from the model): the
/// sanitized username plus `.png`, relative to the output directory. It is
/// populated by [`InstaPost::derive_file_path`] before the CSV export so a
/// human can repoint individual posts at other images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstaPost {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "ImagePrompt")]
    pub image_prompt: String,
    #[serde(rename = "Caption")]
    pub caption: String,
    #[serde(rename = "Likes")]
    pub likes: i64,
    #[serde(rename = "CommentCount")]
    pub comment_count: i64,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "FilePath", default)]
    pub file_path: String,
}

static NON_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w-]").expect("valid regex"));

impl InstaPost {
    /// Populate the derived image path: `<pictures_dir>/<sanitized user>.png`.
    pub fn derive_file_path(&mut self, pictures_dir: &str) {
        let sanitized = NON_FILENAME_CHARS.replace_all(&self.username, "_");
        self.file_path = Path::new(pictures_dir)
            .join(format!("{sanitized}.png"))
            .to_string_lossy()
            .into_owned();
    }
}

/// One Facebook row. `Type` is `"Post"` for the single feed post and
/// `"Comment"` for everything below it. Likes is an opaque display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacebookEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "Likes")]
    pub likes: String,
}

impl FacebookEntry {
    #[must_use]
    pub fn is_post(&self) -> bool {
        self.kind == "Post"
    }
}

/// An ordered, same-shape record set for one platform.
///
/// A compile-time tagged union instead of a dynamically assembled schema:
/// each variant has its own static decode path.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordSet {
    Reddit(Vec<RedditComment>),
    Twitter(Vec<Tweet>),
    Instagram(Vec<InstaPost>),
    Facebook(Vec<FacebookEntry>),
}

impl RecordSet {
    #[must_use]
    pub fn platform(&self) -> Platform {
        match self {
            RecordSet::Reddit(_) => Platform::Reddit,
            RecordSet::Twitter(_) => Platform::Twitter,
            RecordSet::Instagram(_) => Platform::Instagram,
            RecordSet::Facebook(_) => Platform::Facebook,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            RecordSet::Reddit(rows) => rows.len(),
            RecordSet::Twitter(rows) => rows.len(),
            RecordSet::Instagram(rows) => rows.len(),
            RecordSet::Facebook(rows) => rows.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Populate derived columns that must exist before the CSV export.
    /// Only Instagram has one (the per-post image path).
    pub fn derive_columns(&mut self, pictures_dir: &str) {
        if let RecordSet::Instagram(posts) = self {
            for post in posts {
                post.derive_file_path(pictures_dir);
            }
        }
    }
}
