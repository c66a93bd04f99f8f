use std::sync::Arc;

use super::client::ApiClient;
use super::models::{AuthSession, LoginRequest, RegisterRequest, TokenResponse, User};
use crate::{Error, Result};

/// Account endpoints under `/users`
#[derive(Clone)]
pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token, then load the profile behind it
    ///
    /// The token is installed on the client before the profile request; if
    /// that request fails the token is removed again and the error returned.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(Error::Validation("Username and password are required".to_string()));
        }

        let request = LoginRequest {
            username: username.trim(),
            password,
        };
        let token: TokenResponse = self.client.post("/users/login", &request).await?;
        self.client.set_token(Some(token.access_token.clone()));

        match self.current_user().await {
            Ok(user) => {
                tracing::info!(user = %user.username, "Logged in");
                Ok(AuthSession {
                    token: token.access_token,
                    user,
                })
            }
            Err(e) => {
                self.client.set_token(None);
                Err(e)
            }
        }
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User> {
        let request = request.validated()?;
        let user: User = self.client.post("/users/register", &request).await?;
        tracing::info!(user = %user.username, "Registered account");
        Ok(user)
    }

    pub async fn logout(&self) -> Result<()> {
        self.client.post_empty("/users/logout").await
    }

    pub async fn current_user(&self) -> Result<User> {
        if !self.client.has_token() {
            return Err(Error::Unauthorized);
        }
        self.client.get("/users/me", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        let client = ApiClient::with_http(reqwest::Client::new(), "http://127.0.0.1:9").unwrap();
        AuthService::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_current_user_requires_token() {
        let err = service().current_user().await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_login_rejects_blank_credentials() {
        let err = service().login("  ", "secret1").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_validates_before_sending() {
        let request = RegisterRequest {
            username: "x".to_string(),
            email: "x@example.com".to_string(),
            password: "secret1".to_string(),
        };
        let err = service().register(&request).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
