use std::sync::Arc;

use super::token_store::TokenStore;
use crate::api::{ApiClient, AuthService, AuthSession, RegisterRequest, User};
use crate::Result;

/// Owns the login state shared by the TUI and the CLI commands
///
/// The token file and the client's bearer token are kept in step: whatever
/// the manager installs on the client it also persists, and clears both.
pub struct SessionManager {
    client: Arc<ApiClient>,
    auth: AuthService,
    store: TokenStore,
    user: Option<User>,
}

impl SessionManager {
    pub fn new(client: Arc<ApiClient>, store: TokenStore) -> Self {
        Self {
            auth: AuthService::new(client.clone()),
            client,
            store,
            user: None,
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Resume a stored session
    ///
    /// A stored token that the server no longer accepts is discarded and the
    /// session continues anonymously; only local I/O failures are errors.
    pub async fn restore(&mut self) -> Result<Option<&User>> {
        let Some(token) = self.store.load()? else {
            return Ok(None);
        };

        self.client.set_token(Some(token));
        match self.auth.current_user().await {
            Ok(user) => {
                tracing::info!(user = %user.username, "Restored session");
                self.user = Some(user);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored token rejected, continuing anonymously");
                self.clear_local()?;
            }
        }
        Ok(self.user.as_ref())
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<&User> {
        let AuthSession { token, user } = self.auth.login(username, password).await?;
        if let Err(e) = self.store.save(&token) {
            self.client.set_token(None);
            return Err(e);
        }
        Ok(&*self.user.insert(user))
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User> {
        self.auth.register(request).await
    }

    /// End the session; local state is cleared even if the server call fails
    pub async fn logout(&mut self) -> Result<()> {
        if self.client.has_token() {
            if let Err(e) = self.auth.logout().await {
                tracing::warn!(error = %e, "Logout request failed");
            }
        }
        self.clear_local()?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Drop a session the server has rejected, without calling it again
    pub fn expire(&mut self) -> Result<()> {
        if self.user.is_some() || self.client.has_token() {
            tracing::warn!("Session expired");
        }
        self.clear_local()
    }

    fn clear_local(&mut self) -> Result<()> {
        self.client.set_token(None);
        self.user = None;
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> (SessionManager, Arc<ApiClient>, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!("feedsite-session-{}", uuid::Uuid::new_v4()));
        // Port 9 (discard) refuses connections, so every request fails fast
        let client = Arc::new(ApiClient::with_http(reqwest::Client::new(), "http://127.0.0.1:9").unwrap());
        let store = TokenStore::new(dir.join("token"));
        (SessionManager::new(client.clone(), store), client, dir)
    }

    #[tokio::test]
    async fn test_restore_without_token() {
        let (mut session, client, _dir) = manager();
        assert!(session.restore().await.unwrap().is_none());
        assert!(!client.has_token());
    }

    #[tokio::test]
    async fn test_rejected_token_is_discarded() {
        let (mut session, client, dir) = manager();
        TokenStore::new(dir.join("token")).save("stale").unwrap();

        assert!(session.restore().await.unwrap().is_none());
        assert!(!client.has_token());
        assert_eq!(TokenStore::new(dir.join("token")).load().unwrap(), None);
        assert!(!session.is_logged_in());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_server_unreachable() {
        let (mut session, client, dir) = manager();
        let store = TokenStore::new(dir.join("token"));
        store.save("tok").unwrap();
        client.set_token(Some("tok".to_string()));

        session.logout().await.unwrap();
        assert!(!client.has_token());
        assert_eq!(store.load().unwrap(), None);
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_expire_clears_token_file_and_client() {
        let (mut session, client, dir) = manager();
        let store = TokenStore::new(dir.join("token"));
        store.save("tok").unwrap();
        client.set_token(Some("tok".to_string()));

        session.expire().unwrap();
        assert!(!client.has_token());
        assert!(!session.is_logged_in());
        assert_eq!(store.load().unwrap(), None);

        // Nothing left to clear is fine
        session.expire().unwrap();
        std::fs::remove_dir_all(dir).unwrap();
    }
}
