// src/models/user.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{lenient_count, string_or_number};

/// Public profile as served by `GET /profile/{userId}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, deserialize_with = "string_or_number")]
    pub user_id: String,

    #[serde(default)]
    pub username: Option<String>,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,

    #[serde(default, deserialize_with = "lenient_count")]
    pub followers: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub following: u64,
}

impl Profile {
    /// Picture URL, `None` when unset or blank.
    pub fn picture(&self) -> Option<&str> {
        self.profile_picture_url.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Fields a user may change from the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub profile_picture_url: String,
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: String,
    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    pub bio: String,
    pub gender: String,
    #[validate(range(max = 150, message = "Age must be a realistic number"))]
    pub age: Option<u32>,
    pub dob: String,
    pub phone_number: String,
    pub education: String,
    pub status: String,
    pub address: String,
}

impl ProfileUpdate {
    /// Pre-fills the edit form from the current profile.
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            profile_picture_url: profile.picture().unwrap_or_default().to_string(),
            name: profile.name.clone().unwrap_or_default(),
            bio: profile.bio.clone().unwrap_or_default(),
            gender: profile.gender.clone().unwrap_or_default(),
            age: profile.age,
            dob: profile.dob.clone().unwrap_or_default(),
            phone_number: profile.phone_number.clone().unwrap_or_default(),
            education: profile.education.clone().unwrap_or_default(),
            status: profile.status.clone().unwrap_or_default(),
            address: profile.address.clone().unwrap_or_default(),
        }
    }
}

/// `POST /profile/upload-url`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlRequest {
    pub user_id: String,
    pub file_name: String,
    pub file_type: String,
}

/// Pre-signed upload target plus the public URL the file will have.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlResponse {
    pub upload_url: String,
    pub file_url: String,
}

/// DTO for creating a new user (Registration).
#[derive(Debug, Clone, Default, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, max = 50, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub name: String,
}

/// DTO for user login.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct ForgotPasswordForm {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct ResetPasswordForm {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Reset token is required"))]
    pub reset_token: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
    pub confirm_new_password: String,
}

/// Body of `POST /reset-password`.
#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub token: String,
    pub password: String,
}

/// The `user` object returned by `/register` and `/login`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user: AuthUser,
    /// Issued by `/login`; see `controllers::auth::login` for why it is not kept.
    #[serde(default)]
    pub token: Option<String>,
}
