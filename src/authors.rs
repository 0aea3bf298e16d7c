// src/authors.rs

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::RwLock;

use crate::api::ApiClient;

pub const ANONYMOUS: &str = "Anonymous";

/// Name and avatar shown next to a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub username: String,
    pub avatar_url: String,
}

/// Author lookups memoised for the lifetime of one page.
///
/// At most one entry per author id, no eviction, no TTL. Failed lookups
/// return the anonymous fallback and are *not* stored, so the next call
/// retries.
#[derive(Clone)]
pub struct AuthorCache {
    api: ApiClient,
    default_avatar: String,
    entries: Arc<RwLock<HashMap<String, Author>>>,
}

impl AuthorCache {
    pub fn new(api: ApiClient, default_avatar: impl Into<String>) -> Self {
        Self {
            api,
            default_avatar: default_avatar.into(),
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn fallback(&self) -> Author {
        Author {
            username: ANONYMOUS.to_string(),
            avatar_url: self.default_avatar.clone(),
        }
    }

    pub async fn resolve(&self, author_id: &str) -> Author {
        if let Some(hit) = self.entries.read().await.get(author_id) {
            return hit.clone();
        }

        match self.api.get_profile(author_id).await {
            Ok(profile) => {
                let author = Author {
                    username: profile
                        .username
                        .clone()
                        .filter(|name| !name.is_empty())
                        .unwrap_or_else(|| ANONYMOUS.to_string()),
                    avatar_url: profile
                        .picture()
                        .map(str::to_string)
                        .unwrap_or_else(|| self.default_avatar.clone()),
                };
                // A concurrent resolve may have landed first; keep whichever is there.
                self.entries
                    .write()
                    .await
                    .entry(author_id.to_string())
                    .or_insert(author)
                    .clone()
            }
            Err(e) => {
                tracing::error!("Error fetching author profile for {}: {}", author_id, e);
                self.fallback()
            }
        }
    }

    /// Resolves every distinct id concurrently.
    pub async fn resolve_many<'a, I>(&self, author_ids: I) -> HashMap<String, Author>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let unique: HashSet<&str> = author_ids.into_iter().filter(|id| !id.is_empty()).collect();
        let lookups = unique.into_iter().map(|id| async move { (id.to_string(), self.resolve(id).await) });
        join_all(lookups).await.into_iter().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
