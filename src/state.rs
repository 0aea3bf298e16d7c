use std::sync::Arc;

use crate::{
    api::ApiClient,
    authors::AuthorCache,
    config::Config,
    session::{FileStorage, SessionStore, Storage},
};

/// Everything a page needs: configuration, the API client, the session and
/// the page-lifetime author cache. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub api: ApiClient,
    pub session: SessionStore,
    pub authors: AuthorCache,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        let session = SessionStore::new(storage);
        let api = ApiClient::new(&config, session.clone());
        let authors = AuthorCache::new(api.clone(), config.default_avatar_url.clone());
        Self {
            config,
            api,
            session,
            authors,
        }
    }

    /// State whose session persists in `config.session_file`.
    pub fn with_file_session(config: Config) -> Self {
        let storage = Arc::new(FileStorage::new(config.session_file.clone()));
        Self::new(config, storage)
    }

    pub fn viewer_id(&self) -> Option<String> {
        self.session.user_id()
    }
}
