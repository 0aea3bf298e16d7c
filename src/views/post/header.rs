use crate::{
    models::post::Post,
    utils::{dates::short_date, html::escape},
};

/// Title, byline with Follow toggle, date and Bookmark toggle.
pub fn header(post: &Post, is_author: bool) -> String {
    let title = escape(post.title.as_deref().unwrap_or("Untitled Post"));
    let author = escape(post.author_username.as_deref().unwrap_or("Unknown Author"));
    let you = if is_author { " (You)" } else { "" };
    let date = escape(&short_date(post.created_at.as_deref()));

    let follow = if is_author {
        String::new()
    } else {
        let label = if post.is_following_author { "Following" } else { "Follow" };
        format!(r#"<button id="followBtn" class="follow-btn">{}</button>"#, label)
    };

    let bookmark = if post.is_bookmarked {
        r#"<button id="bookmarkBtn" class="bookmark-btn bookmarked">★ Bookmarked</button>"#
    } else {
        r#"<button id="bookmarkBtn" class="bookmark-btn">☆ Bookmark</button>"#
    };

    format!(
        r#"<div class="post-header"><h1>{title}</h1><p class="post-meta">By <span class="author-name">{author}{you}</span> {follow} on <span class="post-date">{date}</span> {bookmark}</p></div>"#
    )
}
