pub mod api;
pub mod config;
pub mod error;
pub mod news;
pub mod session;
pub mod stage;

pub use config::{AppConfig, EasingType, StageConfig};
pub use error::{Error, Result};
