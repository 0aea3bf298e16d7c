//! Fragments of the single-post page.
//!
//! Every function here is pure: same post + viewer in, same markup out.
//! Element ids (`likeBtn`, `followBtn`, ...) name the controls the post page
//! controller drives.

mod comments;
mod content;
mod header;
mod reactions;
mod share;

pub use comments::comments;
pub use content::content;
pub use header::header;
pub use reactions::reactions;
pub use share::share;

use crate::models::post::Post;

/// Which controls of a rendered post are live for the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostActions {
    pub can_like: bool,
    pub can_comment: bool,
    pub can_bookmark: bool,
    /// Hidden on the viewer's own posts.
    pub show_follow: bool,
}

pub fn actions(post: &Post, viewer: Option<&str>) -> PostActions {
    let logged_in = viewer.is_some();
    PostActions {
        can_like: logged_in,
        can_comment: logged_in,
        can_bookmark: logged_in,
        show_follow: !post.is_authored_by(viewer),
    }
}

/// The whole post: header, body, reaction bar, share box and comments.
pub fn post(post: Option<&Post>, viewer: Option<&str>) -> String {
    let Some(post) = post else {
        return "<p>No post data available.</p>".to_string();
    };
    let is_author = post.is_authored_by(viewer);

    format!(
        r#"<div class="blog-post-container">{}{}{}{}{}</div>"#,
        header(post, is_author),
        content(post),
        reactions(post, viewer.is_some()),
        share(),
        comments(post, viewer),
    )
}
