// src/api/mod.rs

pub mod auth;
pub mod interaction;
pub mod posts;
pub mod profile;

use reqwest::{Client, Method, header};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{config::Config, error::AppError, session::SessionStore};

/// Which gateway a path lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Registration, login, password reset, profiles.
    Auth,
    /// Posts, categories, reactions, comments, shares, follows, bookmarks.
    Posts,
}

/// Thin request helper over the remote API.
///
/// * One attempt per call: no retry, no timeout beyond the network stack's.
/// * Every call carries `Authorization: Bearer <token>` read from the session.
///   Nothing in the login flow stores a token, so this is usually empty.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    auth_base: String,
    posts_base: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: &Config, session: SessionStore) -> Self {
        Self {
            http: Client::new(),
            auth_base: config.api_auth_base_url.trim_end_matches('/').to_string(),
            posts_base: config.api_posts_base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn url(&self, service: Service, path: &str) -> String {
        let base = match service {
            Service::Auth => &self.auth_base,
            Service::Posts => &self.posts_base,
        };
        format!("{}{}", base, path)
    }

    /// Issues `method path` with an optional JSON body and returns the parsed JSON.
    /// Non-success statuses become `AppError::Request` carrying the body's
    /// `error`/`message` field when there is one.
    pub async fn request(
        &self,
        service: Service,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, AppError> {
        let url = self.url(service, path);
        let token = self.session.token().unwrap_or_default();

        let mut req = self
            .http
            .request(method.clone(), &url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", token));
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(|e| {
            tracing::error!("{} {} failed: {:?}", method, url, e);
            AppError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| error_message(&v))
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
            tracing::error!("{} {} -> {}: {}", method, url, status.as_u16(), message);
            return Err(AppError::Request(message));
        }

        tracing::debug!("{} {} -> {}", method, url, status.as_u16());

        // DELETE endpoints may answer with an empty body
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!("{} {} returned invalid JSON: {}", method, url, e);
            AppError::Decode(format!("Invalid JSON in response: {}", e))
        })
    }

    /// Same as [`ApiClient::request`] but deserialises into `T`.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        service: Service,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, AppError> {
        let value = self.request(service, method, path, body).await?;
        serde_json::from_value(value).map_err(|e| AppError::Decode(format!("Unexpected response shape: {}", e)))
    }

    /// Direct `PUT` of a raw file body to a pre-signed URL.
    pub async fn upload_raw(&self, url: &str, content_type: &str, bytes: Vec<u8>) -> Result<(), AppError> {
        let response = self
            .http
            .put(url)
            .header(header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!("Upload to {} failed with {}: {}", url, status.as_u16(), text);
            return Err(AppError::Request(format!("Failed to upload file: {}", text)));
        }
        Ok(())
    }
}

fn error_message(body: &Value) -> Option<String> {
    ["error", "message"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Serialises a request DTO into the JSON body `request` takes.
pub(crate) fn to_body<T: serde::Serialize>(dto: &T) -> Result<Value, AppError> {
    Ok(serde_json::to_value(dto)?)
}

/// Encodes a query-string value (space becomes `+`).
pub(crate) fn encode(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

/// Percent-encodes one path segment (space becomes `%20`, `/` is escaped).
pub(crate) fn encode_segment(raw: &str) -> String {
    let Ok(mut scratch) = url::Url::parse("http://localhost/") else {
        return encode(raw);
    };
    if let Ok(mut segments) = scratch.path_segments_mut() {
        segments.clear().push(raw);
    }
    scratch.path().trim_start_matches('/').to_string()
}
