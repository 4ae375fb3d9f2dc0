//! Twitter/X thread renderer.
//!
//! One tweet block per row in sequence order. The profile image is a seeded
//! DiceBear URL with a client-side `onerror` fallback to a fixed default, so
//! a failed avatar fetch still shows a face in the PDF snapshot.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::avatar::{avatar_url, AvatarStyle, FALLBACK_AVATAR_URL};
use crate::records::Tweet;

const PAGE_STYLE: &str = r#"
body {
    font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
    background-color: #f5f8fa;
    margin: 0;
    padding: 20px;
}
.container { max-width: 600px; margin: auto; }
.tweet {
    background-color: white;
    padding: 15px 20px;
    border-bottom: 1px solid #e1e8ed;
    display: flex;
}
.profile-img {
    width: 48px;
    height: 48px;
    margin-right: 15px;
    border-radius: 50%;
    object-fit: cover;
}
.tweet-body { flex-grow: 1; }
.tweet-header { font-weight: bold; }
.tweet-handle { color: #657786; font-weight: normal; margin-left: 5px; }
.tweet-time { color: #657786; font-size: 12px; margin-top: 2px; }
.tweet-content { margin-top: 8px; font-size: 15px; }
.tweet-footer {
    margin-top: 10px;
    font-size: 13px;
    color: #657786;
    display: flex;
    gap: 20px;
    flex-wrap: wrap;
}
.tweet-footer span { cursor: default; }
"#;

/// Render an ordered tweet sequence into a full HTML document.
#[must_use]
pub fn render(tweets: &[Tweet]) -> String {
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { "Twitter Thread" }
                style { (PreEscaped(PAGE_STYLE)) }
            }
            body {
                div class="container" {
                    @for tweet in tweets {
                        (tweet_block(tweet))
                    }
                }
            }
        }
    };
    markup.into_string()
}

fn tweet_block(tweet: &Tweet) -> Markup {
    let profile_image = avatar_url(AvatarStyle::Notionists, &tweet.username);
    let fallback = format!("this.onerror=null;this.src='{FALLBACK_AVATAR_URL}';");
    html! {
        div class="tweet" {
            img class="profile-img" src=(profile_image) alt="Profile" onerror=(PreEscaped(fallback));
            div class="tweet-body" {
                div class="tweet-header" {
                    (tweet.username) " "
                    span class="tweet-handle" { (tweet.handle) }
                }
                div class="tweet-time" { (tweet.time) }
                div class="tweet-content" { (tweet.content) }
                div class="tweet-footer" {
                    span { (tweet.replies) " Replies" }
                    span { (tweet.retweets) " Retweets" }
                    span { (tweet.likes) " Likes" }
                    span { (tweet.views) " Views" }
                }
            }
        }
    }
}
