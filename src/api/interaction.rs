use reqwest::Method;
use serde_json::Value;

use super::{ApiClient, Service, encode_segment, to_body};
use crate::{
    error::AppError,
    models::{
        CreatedResponse,
        comment::NewComment,
        interaction::{NewBookmark, NewFollow, NewReaction, NewShare},
    },
};

impl ApiClient {
    /// Like: returns the reaction id needed to unlike later.
    pub async fn create_reaction(&self, payload: &NewReaction) -> Result<String, AppError> {
        let body = to_body(payload)?;
        let created: CreatedResponse = self
            .request_json(Service::Posts, Method::POST, "/post-reactions", Some(&body))
            .await?;
        Ok(created.id)
    }

    pub async fn delete_reaction(&self, reaction_id: &str) -> Result<Value, AppError> {
        let path = format!("/post-reactions/{}", encode_segment(reaction_id));
        self.request(Service::Posts, Method::DELETE, &path, None).await
    }

    pub async fn create_comment(&self, payload: &NewComment) -> Result<Value, AppError> {
        let body = to_body(payload)?;
        self.request(Service::Posts, Method::POST, "/post-comments", Some(&body))
            .await
    }

    pub async fn create_share(&self, payload: &NewShare) -> Result<Value, AppError> {
        let body = to_body(payload)?;
        self.request(Service::Posts, Method::POST, "/post-shares", Some(&body))
            .await
    }

    pub async fn follow(&self, payload: &NewFollow) -> Result<Value, AppError> {
        let body = to_body(payload)?;
        self.request(Service::Posts, Method::POST, "/user-follows", Some(&body))
            .await
    }

    pub async fn unfollow(&self, follower_id: &str, followed_id: &str) -> Result<Value, AppError> {
        let path = format!("/user-follows/{}/{}", encode_segment(follower_id), encode_segment(followed_id));
        self.request(Service::Posts, Method::DELETE, &path, None).await
    }

    pub async fn bookmark(&self, payload: &NewBookmark) -> Result<Value, AppError> {
        let body = to_body(payload)?;
        self.request(Service::Posts, Method::POST, "/post-bookmarks", Some(&body))
            .await
    }

    pub async fn unbookmark(&self, user_id: &str, post_id: &str) -> Result<Value, AppError> {
        let path = format!("/post-bookmarks/{}/{}", encode_segment(user_id), encode_segment(post_id));
        self.request(Service::Posts, Method::DELETE, &path, None).await
    }
}
