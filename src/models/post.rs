use serde::{Deserialize, Serialize};
use validator::Validate;

use super::comment::Comment;
use super::{lenient_count, opt_string_or_number, string_or_number};

/// A blog post as returned by the posts service.
/// List endpoints fill only the core fields; the single-post endpoint adds
/// comments, counters and the viewer-relative flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default, deserialize_with = "string_or_number")]
    pub post_id: String,
    #[serde(default)]
    pub title: Option<String>,
    /// HTML produced by the rich-text editor.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub author_id: Option<String>,
    #[serde(default)]
    pub author_username: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default, deserialize_with = "lenient_count")]
    pub likes: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub share_count: u64,
    #[serde(default)]
    pub comments: Vec<Comment>,

    /// UI helper: whether the viewer has liked this post.
    #[serde(default)]
    pub user_liked: bool,
    /// Reaction to delete when the viewer unlikes.
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub user_reaction_id: Option<String>,
    #[serde(default)]
    pub is_following_author: bool,
    #[serde(default)]
    pub is_bookmarked: bool,
}

impl Post {
    pub fn is_authored_by(&self, user_id: Option<&str>) -> bool {
        match (self.author_id.as_deref(), user_id) {
            (Some(author), Some(viewer)) => !author.is_empty() && author == viewer,
            _ => false,
        }
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }
}

/// `GET /blog-posts/{id}` answers with either an object or a one-element array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PostEnvelope {
    Many(Vec<Post>),
    One(Box<Post>),
}

impl PostEnvelope {
    pub fn into_post(self) -> Option<Post> {
        match self {
            PostEnvelope::Many(posts) => posts.into_iter().next(),
            PostEnvelope::One(post) => Some(*post),
        }
    }
}

/// Entry of `GET /users/{userId}/bookmarks`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkedPost {
    #[serde(default, deserialize_with = "string_or_number")]
    pub post_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_username: Option<String>,
}

/// DTO for creating a new post.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    pub author_id: String,

    pub status: String,
}

/// Uploading editor media: the file travels base64-encoded in the JSON body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUploadRequest {
    pub file_data: String,
    pub file_name: String,
    pub content_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaUploadResponse {
    pub url: String,
}
