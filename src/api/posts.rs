// src/api/posts.rs

use reqwest::Method;

use super::{ApiClient, Service, encode, encode_segment, to_body};
use crate::{
    error::AppError,
    models::{
        CreatedResponse, ItemsEnvelope,
        category::{Category, PostCategory},
        interaction::NewPostCategory,
        post::{BookmarkedPost, MediaUploadRequest, MediaUploadResponse, NewPost, Post, PostEnvelope},
    },
};

impl ApiClient {
    /// One page of the home feed: `GET /blog-posts?offset=&limit=`.
    pub async fn list_posts(&self, offset: usize, limit: usize) -> Result<Vec<Post>, AppError> {
        let path = format!("/blog-posts?offset={}&limit={}", offset, limit);
        let envelope: ItemsEnvelope<Post> = self.request_json(Service::Posts, Method::GET, &path, None).await?;
        Ok(envelope.items)
    }

    /// Unpaged scan of every post, used by the client-side filtered views.
    pub async fn list_all_posts(&self) -> Result<Vec<Post>, AppError> {
        let envelope: ItemsEnvelope<Post> = self
            .request_json(Service::Posts, Method::GET, "/blog-posts", None)
            .await?;
        Ok(envelope.items)
    }

    /// Full post with comments, counters and viewer-relative flags.
    /// `currentUserId` is only sent for logged-in viewers.
    pub async fn get_post(&self, post_id: &str, current_user_id: Option<&str>) -> Result<Post, AppError> {
        let mut path = format!("/blog-posts/{}", encode_segment(post_id));
        if let Some(viewer) = current_user_id {
            path.push_str(&format!("?currentUserId={}", encode(viewer)));
        }
        let envelope: PostEnvelope = self.request_json(Service::Posts, Method::GET, &path, None).await?;
        envelope
            .into_post()
            .ok_or_else(|| AppError::Request("Post not found".to_string()))
    }

    /// `POST /blog-posts`, returns the new post id.
    pub async fn create_post(&self, payload: &NewPost) -> Result<String, AppError> {
        let body = to_body(payload)?;
        let created: CreatedResponse = self
            .request_json(Service::Posts, Method::POST, "/blog-posts", Some(&body))
            .await?;
        Ok(created.id)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let envelope: ItemsEnvelope<Category> = self
            .request_json(Service::Posts, Method::GET, "/categories", None)
            .await?;
        Ok(envelope.items)
    }

    /// The whole post/category join table in one response.
    pub async fn list_post_categories(&self) -> Result<Vec<PostCategory>, AppError> {
        let envelope: ItemsEnvelope<PostCategory> = self
            .request_json(Service::Posts, Method::GET, "/post-categories", None)
            .await?;
        Ok(envelope.items)
    }

    pub async fn create_post_category(&self, payload: &NewPostCategory) -> Result<(), AppError> {
        let body = to_body(payload)?;
        self.request(Service::Posts, Method::POST, "/post-categories", Some(&body))
            .await?;
        Ok(())
    }

    /// `GET /users/{userId}/posts` (a bare array, not an envelope).
    pub async fn user_posts(&self, user_id: &str) -> Result<Vec<Post>, AppError> {
        let path = format!("/users/{}/posts", encode_segment(user_id));
        self.request_json(Service::Posts, Method::GET, &path, None).await
    }

    /// `GET /users/{userId}/bookmarks`.
    pub async fn user_bookmarks(&self, user_id: &str) -> Result<Vec<BookmarkedPost>, AppError> {
        let path = format!("/users/{}/bookmarks", encode_segment(user_id));
        self.request_json(Service::Posts, Method::GET, &path, None).await
    }

    /// Uploads editor media and returns its public URL.
    pub async fn upload_media(&self, payload: &MediaUploadRequest) -> Result<String, AppError> {
        let body = to_body(payload)?;
        let uploaded: MediaUploadResponse = self
            .request_json(Service::Posts, Method::POST, "/upload-media", Some(&body))
            .await?;
        Ok(uploaded.url)
    }
}
