pub mod cache;
pub mod config;
pub mod dto;
pub mod error;
pub mod graphql;
pub mod models;
pub mod screens;
pub mod services;
pub mod session;
pub mod utils;

use crate::cache::{Cache, SharedCache};
use crate::error::Result;
use crate::graphql::api::JobBoardApi;
use crate::graphql::client::GraphqlClient;
use crate::models::user::User;
use crate::services::auth_service::AuthService;
use crate::session::SessionStore;
use std::sync::Arc;

/// Shared wiring for every screen: the backend seam, the normalized cache
/// and the session store.
#[derive(Clone)]
pub struct AppContext {
    pub api: Arc<dyn JobBoardApi>,
    pub cache: SharedCache,
    pub session: SessionStore,
    pub auth: AuthService,
}

impl AppContext {
    /// Builds the context from the initialized configuration.
    pub fn new() -> Result<Self> {
        let config = crate::config::get_config();
        let session = SessionStore::new(config.token_file.clone());
        let client = GraphqlClient::new(config, session.clone())?;
        Ok(Self::with_api(Arc::new(client), session))
    }

    /// Context over an arbitrary backend implementation; tests inject
    /// in-memory fakes here.
    pub fn with_api(api: Arc<dyn JobBoardApi>, session: SessionStore) -> Self {
        let cache = Cache::new();
        let auth = AuthService::new(api.clone(), session.clone(), cache.clone());
        Self {
            api,
            cache,
            session,
            auth,
        }
    }

    /// Cache-first profile of the logged-in user.
    pub async fn profile(&self) -> Result<User> {
        if let Some(profile) = self.cache.profile() {
            return Ok(profile);
        }
        let profile = self.api.get_user_profile().await?;
        self.cache.store_profile(profile.clone());
        Ok(profile)
    }
}
