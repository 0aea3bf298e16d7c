// src/config.rs

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use url::Url;

use crate::error::AppError;

pub const DEFAULT_AVATAR_URL: &str = "https://images.pexels.com/photos/3771069/pexels-photo-3771069.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=2";

#[derive(Debug, Clone)]
pub struct Config {
    /// Auth + profile service.
    pub api_auth_base_url: String,
    /// Posts, categories, reactions, follows and bookmarks service.
    pub api_posts_base_url: String,
    /// Public origin of the site, used to build share links.
    pub site_url: String,
    pub session_file: PathBuf,
    pub page_size: usize,
    pub default_avatar_url: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        let api_auth_base_url = env::var("API_AUTH_BASE_URL")
            .map_err(|_| AppError::Config("API_AUTH_BASE_URL must be set".to_string()))?;

        let api_posts_base_url = env::var("API_POSTS_BASE_URL")
            .map_err(|_| AppError::Config("API_POSTS_BASE_URL must be set".to_string()))?;

        let site_url = env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

        let session_file = env::var("SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".session.json"));

        let page_size = match env::var("PAGE_SIZE") {
            Ok(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| AppError::Config(format!("PAGE_SIZE must be a positive integer, got '{}'", raw)))?,
            Err(_) => 10,
        };

        let default_avatar_url =
            env::var("DEFAULT_AVATAR_URL").unwrap_or_else(|_| DEFAULT_AVATAR_URL.to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let config = Self {
            api_auth_base_url,
            api_posts_base_url,
            site_url,
            session_file,
            page_size,
            default_avatar_url,
            rust_log,
        };
        config.validate()?;
        Ok(config)
    }

    /// Configuration pointing both services at one origin.
    /// Used by tests and local setups where a single gateway fronts everything.
    pub fn for_base_url(base_url: &str) -> Self {
        Self {
            api_auth_base_url: base_url.to_string(),
            api_posts_base_url: base_url.to_string(),
            site_url: "http://localhost:8080".to_string(),
            session_file: PathBuf::from(".session.json"),
            page_size: 10,
            default_avatar_url: DEFAULT_AVATAR_URL.to_string(),
            rust_log: "error".to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        for raw in [&self.api_auth_base_url, &self.api_posts_base_url, &self.site_url] {
            Url::parse(raw).map_err(|e| AppError::Config(format!("invalid URL '{}': {}", raw, e)))?;
        }
        Ok(())
    }
}
