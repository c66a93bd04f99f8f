pub mod news;
pub mod run;
pub mod session;

use std::sync::Arc;

use anyhow::Result;

use feedsite_core::{
    api::{ApiClient, NewsService},
    session::{SessionManager, TokenStore},
    AppConfig,
};

/// Services sharing one API client, used by every command
pub struct Backend {
    pub session: SessionManager,
    pub news: NewsService,
}

impl Backend {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Arc::new(ApiClient::new(config)?);
        let store = TokenStore::new(config.token_path());
        Ok(Self {
            session: SessionManager::new(client.clone(), store),
            news: NewsService::new(client),
        })
    }

    /// Build and resume any stored session
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        let mut backend = Self::new(config)?;
        backend.session.restore().await?;
        Ok(backend)
    }
}
