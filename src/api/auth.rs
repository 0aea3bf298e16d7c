// src/api/auth.rs

use reqwest::Method;

use super::{ApiClient, Service, to_body};
use crate::{
    error::AppError,
    models::{
        MessageResponse,
        user::{AuthResponse, ForgotPasswordForm, LoginForm, RegisterRequest, ResetPasswordRequest},
    },
};

impl ApiClient {
    /// `POST /register`. Returns the created user (never a token).
    pub async fn register(&self, payload: &RegisterRequest) -> Result<AuthResponse, AppError> {
        let body = to_body(payload)?;
        self.request_json(Service::Auth, Method::POST, "/register", Some(&body))
            .await
    }

    /// `POST /login`.
    pub async fn login(&self, payload: &LoginForm) -> Result<AuthResponse, AppError> {
        let body = to_body(payload)?;
        self.request_json(Service::Auth, Method::POST, "/login", Some(&body))
            .await
    }

    /// `POST /forgot-password`: the service mails (or returns) a reset token.
    pub async fn forgot_password(&self, payload: &ForgotPasswordForm) -> Result<MessageResponse, AppError> {
        let body = to_body(payload)?;
        self.request_json(Service::Auth, Method::POST, "/forgot-password", Some(&body))
            .await
    }

    /// `POST /reset-password`.
    pub async fn reset_password(&self, payload: &ResetPasswordRequest) -> Result<MessageResponse, AppError> {
        let body = to_body(payload)?;
        self.request_json(Service::Auth, Method::POST, "/reset-password", Some(&body))
            .await
    }
}
