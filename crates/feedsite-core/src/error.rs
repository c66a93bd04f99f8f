use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response; `message` is the server's human-readable reason
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("Not logged in")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("News not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Message suitable for a status line
    pub fn user_message(&self) -> String {
        match self {
            Error::Api { message, .. } => message.clone(),
            Error::Http(e) if e.is_timeout() => "The server did not respond in time".to_string(),
            Error::Http(e) if e.is_connect() => "Could not reach the server".to_string(),
            other => other.to_string(),
        }
    }

    /// True for 401 responses and missing sessions
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized | Error::Api { status: 401, .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_user_message() {
        let err = Error::Api {
            status: 400,
            message: "Username already registered".to_string(),
        };
        assert_eq!(err.user_message(), "Username already registered");
        assert_eq!(err.to_string(), "Username already registered (HTTP 400)");
    }

    #[test]
    fn test_unauthorized_detection() {
        assert!(Error::Unauthorized.is_unauthorized());
        assert!(Error::Api { status: 401, message: String::new() }.is_unauthorized());
        assert!(!Error::Api { status: 404, message: String::new() }.is_unauthorized());
    }
}
