//! Instagram post-image synthesis.
//!
//! One generation request per post, strictly sequential. A response without
//! an image payload is skipped silently; the feed then shows the placeholder
//! background for that post. Transport and API errors still abort the run.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::llm::OpenAiClient;
use crate::records::InstaPost;

/// Generate and persist one image per post under `output_dir/<FilePath>`.
///
/// # Errors
///
/// Returns an error if a request fails outright or a returned image cannot
/// be written to disk. Missing payloads are not errors.
pub async fn synthesize(
    client: &OpenAiClient,
    posts: &[InstaPost],
    output_dir: &Path,
) -> Result<()> {
    for post in posts {
        let payload = client
            .generate_image(&post.image_prompt)
            .await
            .with_context(|| format!("Image generation failed for {}", post.username))?;

        let Some(bytes) = payload else {
            debug!(username = %post.username, "No image payload returned; skipping");
            continue;
        };

        let path = output_dir.join(&post.file_path);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("Failed to write image to {}", path.display()))?;

        info!(path = %path.display(), size = bytes.len(), "Post image written");
    }
    Ok(())
}
