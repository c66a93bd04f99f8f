use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const TITLE_MAX: usize = 200;
const DESCRIPTION_MAX: usize = 2000;
const IMAGE_URL_MAX: usize = 500;
const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 50;
const PASSWORD_MIN: usize = 6;
const PASSWORD_MAX: usize = 128;

/// Account as returned by `/users/me` and `/users/register`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Author summary embedded in each news item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub creator_id: Option<i64>,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub creator: Option<Creator>,
}

impl NewsItem {
    /// Author name for bylines
    pub fn author(&self) -> &str {
        self.creator
            .as_ref()
            .map(|c| c.username.as_str())
            .unwrap_or("unknown")
    }
}

/// One page of `/news`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsPage {
    pub items: Vec<NewsItem>,
    pub total: u64,
    pub pages: u32,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
}

fn default_page() -> u32 {
    1
}

/// Query parameters for listing news
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsQuery {
    pub page: u32,
    pub limit: u32,
    pub creator_id: Option<i64>,
}

impl NewsQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, 100),
            creator_id: None,
        }
    }

    pub fn by_creator(mut self, creator_id: i64) -> Self {
        self.creator_id = Some(creator_id);
        self
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        if let Some(id) = self.creator_id {
            pairs.push(("creator_id", id.to_string()));
        }
        pairs
    }
}

/// Payload for creating a news item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsDraft {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewsDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>, image_url: Option<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image_url,
        }
    }

    /// Trim and check fields against the server's limits
    pub fn validated(&self) -> Result<Self> {
        Ok(Self {
            title: validate_title(&self.title)?,
            description: validate_description(&self.description)?,
            image_url: validate_image_url(self.image_url.as_deref())?,
        })
    }
}

impl From<&NewsItem> for NewsDraft {
    fn from(item: &NewsItem) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            image_url: item.image_url.clone(),
        }
    }
}

/// Partial update; absent fields are left unchanged server-side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewsPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.image_url.is_none()
    }

    pub fn validated(&self) -> Result<Self> {
        if self.is_empty() {
            return Err(Error::Validation("Nothing to update".to_string()));
        }
        Ok(Self {
            title: self.title.as_deref().map(validate_title).transpose()?,
            description: self.description.as_deref().map(validate_description).transpose()?,
            image_url: validate_image_url(self.image_url.as_deref())?,
        })
    }
}

impl From<NewsDraft> for NewsPatch {
    fn from(draft: NewsDraft) -> Self {
        Self {
            title: Some(draft.title),
            description: Some(draft.description),
            image_url: draft.image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Registration form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validated(&self) -> Result<Self> {
        let username = self.username.trim();
        let count = username.chars().count();
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&count) {
            return Err(Error::Validation(format!(
                "Username must be {}-{} characters",
                USERNAME_MIN, USERNAME_MAX
            )));
        }
        if !username.chars().all(char::is_alphanumeric) {
            return Err(Error::Validation("Username may only contain letters and digits".to_string()));
        }

        let email = self.email.trim();
        let valid_email = email
            .split_once('@')
            .map(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.ends_with('.'))
            .unwrap_or(false);
        if !valid_email {
            return Err(Error::Validation("Please enter a valid email address".to_string()));
        }

        validate_password(&self.password)?;

        Ok(Self {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

/// A logged-in session: the bearer token and its owner
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

fn validate_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::Validation("Title cannot be empty".to_string()));
    }
    if title.chars().count() > TITLE_MAX {
        return Err(Error::Validation(format!("Title is limited to {} characters", TITLE_MAX)));
    }
    Ok(title.to_string())
}

fn validate_description(description: &str) -> Result<String> {
    let description = description.trim();
    if description.is_empty() {
        return Err(Error::Validation("Description cannot be empty".to_string()));
    }
    if description.chars().count() > DESCRIPTION_MAX {
        return Err(Error::Validation(format!(
            "Description is limited to {} characters",
            DESCRIPTION_MAX
        )));
    }
    Ok(description.to_string())
}

/// Blank means "no image"
fn validate_image_url(url: Option<&str>) -> Result<Option<String>> {
    let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) else {
        return Ok(None);
    };
    if url.chars().count() > IMAGE_URL_MAX {
        return Err(Error::Validation(format!(
            "Image URL is limited to {} characters",
            IMAGE_URL_MAX
        )));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(Error::Validation("Image URL must start with http:// or https://".to_string()));
    }
    Ok(Some(url.to_string()))
}

fn validate_password(password: &str) -> Result<()> {
    let count = password.chars().count();
    if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&count) {
        return Err(Error::Validation(format!(
            "Password must be {}-{} characters",
            PASSWORD_MIN, PASSWORD_MAX
        )));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(Error::Validation("Password must contain at least one digit".to_string()));
    }
    if !password.chars().any(char::is_alphabetic) {
        return Err(Error::Validation("Password must contain at least one letter".to_string()));
    }
    Ok(())
}

/// Timestamps arrive either as RFC 3339 or as naive ISO 8601 (assumed UTC)
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            match raw {
                None => Ok(None),
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_page_deserializes_backend_shape() {
        let body = r#"{
            "items": [{
                "id": 3,
                "title": "Launch",
                "description": "We shipped",
                "image_url": null,
                "creator_id": 1,
                "created_at": "2024-05-01T10:20:30.123456",
                "updated_at": null,
                "creator": {"id": 1, "username": "alice", "email": "a@example.com", "avatar_url": null}
            }],
            "total": 7,
            "page": 1,
            "size": 6,
            "pages": 2
        }"#;

        let page: NewsPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.pages, 2);
        assert_eq!(page.total, 7);
        let item = &page.items[0];
        assert_eq!(item.author(), "alice");
        assert_eq!(
            item.created_at.unwrap().to_rfc3339(),
            "2024-05-01T10:20:30.123456+00:00"
        );
    }

    #[test]
    fn test_rfc3339_timestamps() {
        let user: User = serde_json::from_str(
            r#"{"id": 1, "username": "bob", "email": "b@example.com", "created_at": "2024-05-01T10:20:30+02:00"}"#,
        )
        .unwrap();
        assert_eq!(user.created_at.unwrap().to_rfc3339(), "2024-05-01T08:20:30+00:00");
    }

    #[test]
    fn test_query_pairs() {
        let query = NewsQuery::new(0, 500).by_creator(9);
        assert_eq!(
            query.to_pairs(),
            vec![
                ("page", "1".to_string()),
                ("limit", "100".to_string()),
                ("creator_id", "9".to_string())
            ]
        );
    }

    #[test]
    fn test_draft_validation_trims() {
        let draft = NewsDraft::new("  Hello ", " World ", Some("   ".to_string()));
        let valid = draft.validated().unwrap();
        assert_eq!(valid.title, "Hello");
        assert_eq!(valid.description, "World");
        assert_eq!(valid.image_url, None);
    }

    #[test]
    fn test_draft_rejects_bad_fields() {
        assert!(NewsDraft::new("  ", "x", None).validated().is_err());
        assert!(NewsDraft::new("x", "", None).validated().is_err());
        assert!(NewsDraft::new("x".repeat(201), "x", None).validated().is_err());
        assert!(NewsDraft::new("x", "x", Some("ftp://img".to_string())).validated().is_err());
        assert!(NewsDraft::new("x", "x", Some("https://img.example/a.png".to_string()))
            .validated()
            .is_ok());
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = NewsPatch {
            title: Some("New".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"title":"New"}"#);
        assert!(NewsPatch::default().validated().is_err());
    }

    #[test]
    fn test_register_validation() {
        let ok = RegisterRequest {
            username: "alice1".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(ok.validated().is_ok());

        let mut bad = ok.clone();
        bad.username = "al".to_string();
        assert!(bad.validated().is_err());

        let mut bad = ok.clone();
        bad.username = "alice_1".to_string();
        assert!(bad.validated().is_err());

        let mut bad = ok.clone();
        bad.email = "alice.example.com".to_string();
        assert!(bad.validated().is_err());

        let mut bad = ok.clone();
        bad.password = "secrets".to_string();
        assert!(bad.validated().is_err());

        let mut bad = ok;
        bad.password = "123456".to_string();
        assert!(bad.validated().is_err());
    }
}
