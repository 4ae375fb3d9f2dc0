//! Instagram feed renderer.
//!
//! Expects `FilePath` to already be populated (and, normally, the image
//! synthesis pass to have run). A post whose image was skipped simply shows
//! the grey placeholder background.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::avatar::{avatar_url, AvatarStyle};
use crate::records::InstaPost;
use crate::render::format_count;

const PAGE_STYLE: &str = r#"
body {
    font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif;
    background-color: #fafafa;
    margin: 0;
    padding: 20px;
}
.container { max-width: 600px; margin: auto; }
.insta-post {
    background-color: white;
    border: 1px solid #dbdbdb;
    border-radius: 3px;
    margin-bottom: 20px;
}
.post-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    padding: 14px;
}
.user-info { display: flex; align-items: center; }
.profile-pic {
    width: 32px;
    height: 32px;
    border-radius: 50%;
    margin-right: 10px;
    object-fit: cover;
}
.username { font-weight: bold; }
.timestamp { font-size: 12px; color: #8e8e8e; }
.post-image {
    width: 100%;
    height: 600px;
    object-fit: cover;
    background-color: #efefef;
}
.post-content { padding: 0 14px 14px 14px; }
.likes { font-weight: bold; margin: 8px 0; }
.caption { margin: 4px 0; }
.view-comments { color: #8e8e8e; font-size: 14px; margin-top: 6px; }
"#;

/// Render an ordered post sequence into a full HTML document.
#[must_use]
pub fn render(posts: &[InstaPost]) -> String {
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { "Instagram Feed" }
                style { (PreEscaped(PAGE_STYLE)) }
            }
            body {
                div class="container" {
                    @for post in posts {
                        (post_block(post))
                    }
                }
            }
        }
    };
    markup.into_string()
}

fn post_block(post: &InstaPost) -> Markup {
    let profile_image = avatar_url(AvatarStyle::Lorelei, &post.username);
    html! {
        div class="insta-post" {
            div class="post-header" {
                div class="user-info" {
                    img class="profile-pic" src=(profile_image) alt="Profile";
                    div {
                        span class="username" { (post.username) }
                        span style="color: #8e8e8e; padding: 0 4px;" { "•" }
                        span class="timestamp" { (post.time) }
                    }
                }
                div style="font-weight: bold; font-size: 20px;" { "⋯" }
            }
            img class="post-image" src=(post.file_path) alt="Post image";
            div class="post-content" {
                div class="likes" { (format_count(post.likes)) " likes" }
                div class="caption" {
                    span class="username" { (post.username) }
                    " " (post.caption)
                }
                div class="view-comments" {
                    "View all " (format_count(post.comment_count)) " comments"
                }
            }
        }
    }
}
