use crate::{
    models::post::Post,
    utils::html::{clean_html, escape},
};

pub fn content(post: &Post) -> String {
    let image = post
        .image_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .map(|url| format!(r#"<img src="{}" alt="Post Image" class="post-image">"#, escape(url)))
        .unwrap_or_default();

    let body = match post.content.as_deref().filter(|c| !c.trim().is_empty()) {
        Some(html) => clean_html(html),
        None => "No content available.".to_string(),
    };

    format!(r#"<div class="post-content">{}<div class="post-body">{}</div></div>"#, image, body)
}
