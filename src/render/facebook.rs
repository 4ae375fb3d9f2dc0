//! Facebook post-and-comments renderer.
//!
//! The record set is expected to hold exactly one `Type == "Post"` row; the
//! rest render as a flat comment list below a shared reaction bar. When the
//! invariant is violated: zero posts is an error, more than one takes the
//! first and logs a warning (the surplus rows are dropped, not reinterpreted).

use maud::{html, Markup, PreEscaped, DOCTYPE};
use tracing::warn;

use crate::avatar::{avatar_url, AvatarStyle};
use crate::records::FacebookEntry;
use crate::render::RenderError;

const PAGE_STYLE: &str = r#"
body { font-family: Arial, sans-serif; background: #f0f2f5; margin: 0; padding: 20px; }
.post-container {
    background: #fff;
    border-radius: 8px;
    padding: 15px;
    max-width: 600px;
    margin: 20px auto;
    box-shadow: 0 2px 5px rgba(0,0,0,0.1);
}
.post-header {
    display: flex;
    align-items: center;
    justify-content: space-between;
    margin-bottom: 8px;
}
.header-left { display: flex; align-items: center; }
.post-options { font-size: 1.25em; color: #888; cursor: pointer; }
.avatar { width: 40px; height: 40px; border-radius: 50%; margin-right: 10px; }
.user-info { display: flex; flex-direction: column; }
.user-name { font-weight: bold; }
.timestamp { font-size: 0.85em; color: #555; }
.post-text { margin: 6px 0 8px 0; font-size: 1em; }
.like-count { font-size: 0.9em; color: #65676b; margin: 4px 0; }
.reaction-bar {
    display: flex;
    justify-content: space-around;
    padding: 10px 0;
    border-top: 1px solid #ccc;
    border-bottom: 1px solid #ccc;
    margin: 10px 0;
}
.reaction-bar span { cursor: pointer; color: #65676b; font-size: 0.95em; }
.comments-section { margin-top: 10px; }
.comment { display: flex; align-items: flex-start; margin-top: 12px; gap: 10px; }
.comment-avatar { width: 40px; height: 40px; border-radius: 50%; flex-shrink: 0; }
.comment-body {
    background: #f0f2f5;
    border-radius: 15px;
    padding: 8px 12px;
    display: inline-block;
    max-width: calc(100% - 50px);
    position: relative;
    word-wrap: break-word;
}
.comment-author { font-weight: bold; margin-bottom: 4px; }
.comment-text { margin-bottom: 6px; word-wrap: break-word; }
.comment-meta { font-size: 0.75em; color: #777; }
.comment-like {
    position: absolute;
    bottom: 6px;
    right: 12px;
    font-size: 0.75em;
    color: #65676b;
}
.icon { font-family: "Segoe UI Symbol", sans-serif; font-weight: normal; }
"#;

/// Render a post-and-comments record set into a full HTML document.
///
/// # Errors
///
/// Returns [`RenderError::MissingPost`] when no row has `Type == "Post"`.
pub fn render(entries: &[FacebookEntry]) -> Result<String, RenderError> {
    let post = entries
        .iter()
        .find(|e| e.is_post())
        .ok_or(RenderError::MissingPost)?;

    let post_count = entries.iter().filter(|e| e.is_post()).count();
    if post_count > 1 {
        warn!(
            posts = post_count,
            "Facebook record set has multiple Post entries; rendering the first"
        );
    }

    let comments: Vec<&FacebookEntry> = entries.iter().filter(|e| !e.is_post()).collect();

    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Facebook Posts" }
                style { (PreEscaped(PAGE_STYLE)) }
            }
            body {
                div class="post-container" {
                    (post_header(post))
                    div class="reaction-bar" {
                        span class="icon" { "♡ Like" }
                        span class="icon" { "💬 Comment" }
                        span class="icon" { "🔗 Share" }
                    }
                    div class="comments-section" {
                        @for comment in comments {
                            (comment_block(comment))
                        }
                    }
                }
            }
        }
    };
    Ok(markup.into_string())
}

fn post_header(post: &FacebookEntry) -> Markup {
    let profile_image = avatar_url(AvatarStyle::Avataaars, &post.name);
    html! {
        div class="post-header" {
            div class="header-left" {
                img src=(profile_image) alt="Avatar" class="avatar";
                div class="user-info" {
                    span class="user-name" { (post.name) }
                    span class="timestamp" { (post.time) }
                }
            }
            div class="post-options" { "⋯" }
        }
        div class="post-text" { (post.text) }
        div class="like-count" { "♡ " (post.likes) " people like this" }
    }
}

fn comment_block(comment: &FacebookEntry) -> Markup {
    let profile_image = avatar_url(AvatarStyle::Avataaars, &comment.name);
    html! {
        div class="comment" {
            img src=(profile_image) alt="Commenter Avatar" class="comment-avatar";
            div class="comment-body" {
                div class="comment-author" { (comment.name) }
                div class="comment-text" { (comment.text) }
                div class="comment-meta" { (comment.time) }
                div class="comment-like" { "♡ " (comment.likes) }
            }
        }
    }
}
