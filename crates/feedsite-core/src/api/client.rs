use std::sync::RwLock;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, Proxy, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::AppConfig;
use crate::{Error, Result};

/// Thin JSON client for the news API
///
/// Holds the bearer token of the current session; every request made while
/// a token is set carries an `Authorization: Bearer` header.
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a client from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let http = Self::build_client(config.api.request_timeout_secs, &config.api.proxy_url)?;
        Self::with_http(http, &config.api.base_url)
    }

    /// Create a client around an existing reqwest client
    pub fn with_http(http: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))?;
        Ok(Self {
            http,
            base_url,
            token: RwLock::new(None),
        })
    }

    /// Build HTTP client with optional proxy
    fn build_client(timeout_secs: u64, proxy_url: &Option<String>) -> Result<Client> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .gzip(true)
            .deflate(true)
            .brotli(true);

        if let Some(ref proxy) = proxy_url {
            let proxy = Proxy::all(proxy)
                .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
            tracing::info!("Using HTTP proxy for API requests");
        }

        builder.build().map_err(Error::Http)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Replace the session token (None clears it)
    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = token;
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    /// Resolve an API path against the base URL
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&joined)?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        let mut builder = self.http.request(method, url);
        if let Some(token) = self.token() {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        Ok(builder)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self.request(Method::GET, path)?.query(query).send().await?;
        Self::parse_json(response).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self.request(Method::POST, path)?.json(body).send().await?;
        Self::parse_json(response).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self.request(Method::PUT, path)?.json(body).send().await?;
        Self::parse_json(response).await
    }

    /// POST without a body, ignoring any response payload
    pub async fn post_empty(&self, path: &str) -> Result<()> {
        let response = self.request(Method::POST, path)?.send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    /// DELETE, ignoring any response payload
    pub async fn delete(&self, path: &str) -> Result<()> {
        let response = self.request(Method::DELETE, path)?.send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = Self::check_status(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(status, &body);
        tracing::debug!(status = status.as_u16(), %message, "API request failed");
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Pull a human-readable reason out of an error body
///
/// Understands `{"detail": "..."}`, validation lists of the form
/// `{"detail": [{"msg": "..."}]}` and `{"message": "..."}`.
pub fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value.get("detail") {
            Some(serde_json::Value::String(detail)) if !detail.is_empty() => {
                return detail.clone();
            }
            Some(serde_json::Value::Array(items)) => {
                if let Some(msg) = items
                    .first()
                    .and_then(|item| item.get("msg"))
                    .and_then(|msg| msg.as_str())
                {
                    return msg.to_string();
                }
                return "Please check the submitted fields".to_string();
            }
            _ => {}
        }
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::with_http(Client::new(), base).unwrap()
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let api = client("http://localhost:8000/api/");
        assert_eq!(
            api.endpoint("/users/login").unwrap().as_str(),
            "http://localhost:8000/api/users/login"
        );
        assert_eq!(
            api.endpoint("news/7").unwrap().as_str(),
            "http://localhost:8000/api/news/7"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(ApiClient::with_http(Client::new(), "not a url").is_err());
    }

    #[test]
    fn test_token_lifecycle() {
        let api = client("http://localhost:8000");
        assert!(!api.has_token());
        api.set_token(Some("abc".to_string()));
        assert_eq!(api.token().as_deref(), Some("abc"));
        api.set_token(None);
        assert!(!api.has_token());
    }

    #[test]
    fn test_extract_detail_string() {
        let msg = extract_error_message(StatusCode::BAD_REQUEST, r#"{"detail":"Incorrect username or password"}"#);
        assert_eq!(msg, "Incorrect username or password");
    }

    #[test]
    fn test_extract_detail_list() {
        let body = r#"{"detail":[{"loc":["body","password"],"msg":"Password must contain a digit","type":"value_error"}]}"#;
        let msg = extract_error_message(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert_eq!(msg, "Password must contain a digit");

        let msg = extract_error_message(StatusCode::UNPROCESSABLE_ENTITY, r#"{"detail":[]}"#);
        assert_eq!(msg, "Please check the submitted fields");
    }

    #[test]
    fn test_extract_message_field() {
        let msg = extract_error_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":"Database unavailable"}"#);
        assert_eq!(msg, "Database unavailable");
    }

    #[test]
    fn test_extract_falls_back_to_reason() {
        assert_eq!(extract_error_message(StatusCode::NOT_FOUND, "<html>"), "Not Found");
    }
}
