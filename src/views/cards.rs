//! Post cards for list pages and the category listings.

use crate::{
    api::encode,
    authors::Author,
    models::post::{BookmarkedPost, Post},
    utils::{
        dates::{long_date, short_date},
        html::{escape, escape_attr, excerpt, first_media_url},
    },
};

pub fn post_link(post_id: &str) -> String {
    format!("/post/post.html?id={}", encode(post_id))
}

pub fn profile_link(user_id: &str) -> String {
    format!("/pages/profile.html?userId={}", encode(user_id))
}

pub fn category_link(name: &str) -> String {
    format!("/pages/category.html?category={}", encode(name))
}

/// Feed card: media thumbnail, title, author, date and a text excerpt.
/// `link_author` makes the byline point at the author's profile (home feed).
pub fn feed_card(post: &Post, author: &Author, link_author: bool) -> String {
    let body = post.content.as_deref().unwrap_or_default();
    let title = escape(post.title.as_deref().unwrap_or("Untitled Post"));
    let link = escape(&post_link(&post.post_id));

    let media = first_media_url(body)
        .map(|url| {
            format!(
                r#"<div class="blog-post-media"><img src="{}" alt="{}" /></div>"#,
                escape_attr(&url),
                title
            )
        })
        .unwrap_or_default();

    let byline = match (link_author, post.author_id.as_deref()) {
        (true, Some(author_id)) => format!(
            r#"<a href="{}">{}</a>"#,
            escape(&profile_link(author_id)),
            escape(&author.username)
        ),
        _ => escape(&author.username),
    };

    format!(
        r#"<div class="blog-post">{media}<div class="blog-post-content"><h3 class="blog-post-title"><a href="{link}">{title}</a></h3><div class="blog-post-meta"><span class="blog-post-author">By {byline}</span><span class="blog-post-date">{date}</span></div><p class="blog-post-excerpt">{excerpt}...</p><a href="{link}" class="read-more">Read More</a></div></div>"#,
        date = escape(&long_date(post.created_at.as_deref())),
        excerpt = escape(&excerpt(body)),
    )
}

fn stats(post: &Post) -> String {
    format!(
        r#"<div class="post-stats"><span><i class="fas fa-heart"></i> {}</span><span><i class="fas fa-comment"></i> {}</span><span><i class="fas fa-share-alt"></i> {}</span></div>"#,
        post.likes,
        post.comment_count(),
        post.share_count
    )
}

/// Card on a public profile: author avatar + name, title, date and counters.
pub fn profile_post_card(post: &Post, author: &Author) -> String {
    let link = escape(&post_link(&post.post_id));
    let author_name = escape(&author.username);
    let author_link = post
        .author_id
        .as_deref()
        .map(|id| escape(&profile_link(id)))
        .unwrap_or_default();

    format!(
        r#"<div class="post-card"><div class="post-card-header"><div class="post-author-info"><img src="{avatar}" alt="{author_name}" class="post-author-avatar"><span class="post-author-name"><a href="{author_link}">{author_name}</a></span></div><h3><a href="{link}">{title}</a></h3><span class="post-date">{date}</span></div><div class="post-card-footer">{stats}<a href="{link}" class="btn btn-sm btn-primary">Read More</a></div></div>"#,
        avatar = escape(&author.avatar_url),
        title = escape(post.title.as_deref().unwrap_or("Untitled Post")),
        date = escape(&short_date(post.created_at.as_deref())),
        stats = stats(post),
    )
}

/// Card in the dashboard's "my posts" list.
pub fn dashboard_post_card(post: &Post) -> String {
    let link = escape(&post_link(&post.post_id));
    format!(
        r#"<div class="post-card"><div class="post-card-header"><h3><a href="{link}">{title}</a></h3><span class="post-date">{date}</span></div><div class="post-card-footer">{stats}<a href="{link}" class="btn btn-sm btn-primary">Read More</a></div></div>"#,
        title = escape(post.title.as_deref().unwrap_or("Untitled Post")),
        date = escape(&short_date(post.created_at.as_deref())),
        stats = stats(post),
    )
}

pub fn bookmark_card(bookmark: &BookmarkedPost) -> String {
    let link = escape(&post_link(&bookmark.post_id));
    format!(
        r#"<div class="post-card"><div class="post-card-header"><h3><a href="{link}">{title}</a></h3><span class="post-author">By: {author}</span></div><div class="post-card-footer"><a href="{link}" class="btn btn-sm btn-outline">View Post</a></div></div>"#,
        title = escape(bookmark.title.as_deref().unwrap_or("Untitled Post")),
        author = escape(bookmark.author_username.as_deref().unwrap_or("N/A")),
    )
}

/// Entry of the home page's category sidebar.
pub fn category_list_item(display_name: &str, count: usize) -> String {
    format!(
        r#"<li><a href="{}">{} <span>{}</span></a></li>"#,
        escape(&category_link(display_name)),
        escape(display_name),
        count
    )
}

/// Tile on the all-categories page.
pub fn category_card(name: &str, display_name: &str, count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!(
        r#"<div class="category-card-item"><h3>{}</h3><p>{} post{}</p><a href="{}" class="btn btn-primary">View Posts</a></div>"#,
        escape(display_name),
        count,
        plural,
        escape(&category_link(name))
    )
}

pub fn notice(message: &str) -> String {
    format!("<p>{}</p>", escape(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> Author {
        Author {
            username: "writer".into(),
            avatar_url: "https://cdn/a.png".into(),
        }
    }

    #[test]
    fn feed_card_pulls_media_and_excerpt() {
        let post = Post {
            post_id: "p9".into(),
            title: Some("Trip".into()),
            content: Some(r#"<p>Mountains</p><img src="https://cdn/m.jpg">"#.into()),
            author_id: Some("u1".into()),
            ..Post::default()
        };
        let html = feed_card(&post, &author(), true);
        assert!(html.contains("blog-post-media"));
        assert!(html.contains("Mountains..."));
        assert!(html.contains("writer"));
        assert!(html.contains("profile.html"));
    }

    #[test]
    fn thumbnail_url_is_escaped_once() {
        let post = Post {
            post_id: "p9".into(),
            content: Some(r#"<img src="https://cdn/m.jpg?w=300&amp;h=200"><p>x</p>"#.into()),
            ..Post::default()
        };
        let html = feed_card(&post, &author(), false);
        assert!(html.contains(r#"<img src="https://cdn/m.jpg?w=300&amp;h=200""#));
        assert!(!html.contains("&amp;amp;"));
    }

    #[test]
    fn feed_card_without_media_has_no_thumbnail() {
        let post = Post {
            post_id: "p9".into(),
            content: Some("<p>Text</p>".into()),
            ..Post::default()
        };
        assert!(!feed_card(&post, &author(), false).contains("blog-post-media"));
    }

    #[test]
    fn category_card_pluralises() {
        assert!(category_card("tech", "Tech", 1).contains("1 post<"));
        assert!(category_card("tech", "Tech", 2).contains("2 posts<"));
    }
}
