use crate::models::post::Post;

/// Like / comment / share counters. The like button is disabled for
/// anonymous viewers.
pub fn reactions(post: &Post, can_like: bool) -> String {
    let (button_class, icon_class) = if post.user_liked {
        ("liked", "fas fa-heart")
    } else {
        ("", "far fa-heart")
    };
    let disabled = if can_like {
        ""
    } else {
        r#" disabled title="Log in to like this post""#
    };

    format!(
        r#"<div class="post-reactions"><button id="likeBtn" class="{button_class}"{disabled}><i class="{icon_class}"></i> Like (<span id="likeCount">{likes}</span>)</button><button><i class="far fa-comment"></i> Comment (<span id="commentCountDisplay">{comments}</span>)</button><button id="shareBtn"><i class="fas fa-share"></i> Share (<span id="shareCount">{shares}</span>)</button></div>"#,
        likes = post.likes,
        comments = post.comment_count(),
        shares = post.share_count,
    )
}
