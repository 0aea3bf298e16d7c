use reqwest::Method;

use super::{ApiClient, Service, encode_segment, to_body};
use crate::{
    error::AppError,
    models::user::{Profile, ProfileUpdate, UploadUrlRequest, UploadUrlResponse},
};

impl ApiClient {
    pub async fn get_profile(&self, user_id: &str) -> Result<Profile, AppError> {
        let path = format!("/profile/{}", encode_segment(user_id));
        self.request_json(Service::Auth, Method::GET, &path, None).await
    }

    /// `PUT /profile/{userId}`, returns the updated profile.
    pub async fn update_profile(&self, user_id: &str, update: &ProfileUpdate) -> Result<Profile, AppError> {
        let path = format!("/profile/{}", encode_segment(user_id));
        let body = to_body(update)?;
        self.request_json(Service::Auth, Method::PUT, &path, Some(&body))
            .await
    }

    /// Asks for a pre-signed URL to upload a profile picture to.
    pub async fn profile_upload_url(&self, payload: &UploadUrlRequest) -> Result<UploadUrlResponse, AppError> {
        let body = to_body(payload)?;
        self.request_json(Service::Auth, Method::POST, "/profile/upload-url", Some(&body))
            .await
    }
}
