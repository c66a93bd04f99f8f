//! REST client for the news backend
//!
//! `ApiClient` owns transport and the bearer token; `AuthService` and
//! `NewsService` are thin typed wrappers over its endpoints.

mod auth;
mod client;
mod models;
mod news;

pub use auth::AuthService;
pub use client::{extract_error_message, ApiClient};
pub use models::{
    AuthSession, Creator, LoginRequest, NewsDraft, NewsItem, NewsPage, NewsPatch, NewsQuery,
    RegisterRequest, TokenResponse, User,
};
pub use news::NewsService;
