use crate::{models::post::Post, utils::html::escape};

/// Comment list in the order the API returned it, plus the compose box.
pub fn comments(post: &Post, viewer: Option<&str>) -> String {
    let entries = if post.comments.is_empty() {
        "<p>No comments yet. Be the first to comment!</p>".to_string()
    } else {
        post.comments
            .iter()
            .map(|comment| {
                let mine = matches!((comment.user_id.as_deref(), viewer), (Some(a), Some(b)) if a == b);
                let class = if mine {
                    "comment-item current-user-comment"
                } else {
                    "comment-item"
                };
                format!(
                    r#"<div class="{}"><p class="comment-author"><strong>{}:</strong></p><p class="comment-text">{}</p></div>"#,
                    class,
                    escape(comment.username.as_deref().unwrap_or("Anonymous")),
                    escape(comment.content.as_deref().unwrap_or("No comment content.")),
                )
            })
            .collect::<String>()
    };

    format!(
        r#"<div class="post-comments"><h3>Comments ({})</h3><div class="comment-list">{}</div><div class="comment-form"><input type="text" id="commentInput" placeholder="Add a comment..." /><button id="postCommentBtn">Post Comment</button></div></div>"#,
        post.comment_count(),
        entries
    )
}
