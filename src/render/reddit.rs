//! Reddit comment-thread renderer.
//!
//! Nesting is purely visual: a `"top"` row opens a new post box, every other
//! row renders as an indented comment box in sequence order. There is no
//! parent-id linkage between rows.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::records::RedditComment;

const PAGE_STYLE: &str = r#"
body { font-family: Arial, sans-serif; background-color: #dae0e6; padding: 20px; }
.container { max-width: 800px; margin: auto; }
.post-box, .comment-box {
    background-color: white;
    padding: 15px;
    border-radius: 8px;
    margin-top: 10px;
    border: 1px solid #ccc;
}
.comment-box { margin-left: 20px; border-left: 2px solid #ccc; }
.username { color: #0079d3; font-weight: bold; }
.meta { color: #7c7c7c; font-size: 12px; }
.upvotes { color: #ff4500; font-weight: bold; margin-right: 10px; }
"#;

/// Render an ordered comment sequence into a full HTML document.
#[must_use]
pub fn render(comments: &[RedditComment]) -> String {
    let markup = html! {
        (DOCTYPE)
        html {
            head {
                meta charset="UTF-8";
                title { "Reddit Comments" }
                style { (PreEscaped(PAGE_STYLE)) }
            }
            body {
                div class="container" {
                    @for comment in comments {
                        (comment_box(comment))
                    }
                }
            }
        }
    };
    markup.into_string()
}

fn comment_box(comment: &RedditComment) -> Markup {
    let box_class = if comment.is_top_level() {
        "post-box"
    } else {
        "comment-box"
    };
    html! {
        div class=(box_class) {
            div class="meta" {
                span class="upvotes" { "⬆ " (comment.upvotes) }
                span class="username" { "u/" (comment.username) }
                " · " (comment.time)
            }
            div class="text" { (comment.content) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(kind: &str, username: &str, content: &str) -> RedditComment {
        RedditComment {
            kind: kind.to_string(),
            username: username.to_string(),
            upvotes: "42".to_string(),
            time: "2h".to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_top_comment_nested_between_tops() {
        let comments = vec![
            comment("top", "alice", "first thread"),
            comment("comment", "bob", "a reply"),
            comment("top", "carol", "second thread"),
        ];
        let html = render(&comments);

        assert_eq!(html.matches(r#"class="post-box""#).count(), 2);
        assert_eq!(html.matches(r#"class="comment-box""#).count(), 1);
        // The reply sits between the two thread boxes.
        let reply_pos = html.find("a reply").unwrap();
        assert!(html.find("first thread").unwrap() < reply_pos);
        assert!(reply_pos < html.find("second thread").unwrap());
    }

    #[test]
    fn test_unknown_type_renders_as_comment_level() {
        let comments = vec![comment("something-else", "dave", "odd row")];
        let html = render(&comments);
        assert!(html.contains(r#"class="comment-box""#));
        assert!(!html.contains(r#"class="post-box""#));
    }

    #[test]
    fn test_meta_line_contents() {
        let html = render(&[comment("top", "alice", "body text")]);
        assert!(html.contains("⬆ 42"));
        assert!(html.contains("u/alice"));
        assert!(html.contains(" · 2h"));
        assert!(html.contains("body text"));
    }

    #[test]
    fn test_content_is_escaped() {
        let html = render(&[comment("top", "alice", "<script>alert(1)</script>")]);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_empty_sequence_renders_shell() {
        let html = render(&[]);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<div class="container">"#));
        assert!(!html.contains(r#"class="post-box""#));
    }
}
