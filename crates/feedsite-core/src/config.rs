use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub stage: StageConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (token and log file live here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the news API, e.g. "http://localhost:8000/api"
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// HTTP proxy URL (e.g., "http://127.0.0.1:7890" or "socks5://127.0.0.1:1080")
    #[serde(default)]
    pub proxy_url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            request_timeout_secs: default_timeout(),
            proxy_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// Items per page on the public news feed
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Items fetched by the management console
    #[serde(default = "default_manage_page_size")]
    pub manage_page_size: u32,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            manage_page_size: default_manage_page_size(),
        }
    }
}

/// Tuning for the full-page stage: caption crawl and page transitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    /// Progress points per wheel pixel
    #[serde(default = "default_wheel_sensitivity")]
    pub wheel_sensitivity: f64,
    /// Page transition length; the navigation lock is held this long at most
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
    /// Delay between the caption crawl reaching 100 and its completion signal
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    /// Minimum drag distance that counts as a swipe
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold_px: f64,
    /// Delay between mounting the stage and delivering a deferred navbar request
    #[serde(default = "default_nav_mount_delay")]
    pub nav_mount_delay_ms: u64,
    /// Pixels reported for one mouse wheel notch
    #[serde(default = "default_wheel_step")]
    pub wheel_step_px: f64,
    /// Pixels represented by one terminal row of mouse drag
    #[serde(default = "default_drag_row")]
    pub drag_row_px: f64,
    /// Pixels a caption-advancing key press is worth
    #[serde(default = "default_key_step")]
    pub key_step_px: f64,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            wheel_sensitivity: default_wheel_sensitivity(),
            transition_ms: default_transition_ms(),
            settle_ms: default_settle_ms(),
            swipe_threshold_px: default_swipe_threshold(),
            nav_mount_delay_ms: default_nav_mount_delay(),
            wheel_step_px: default_wheel_step(),
            drag_row_px: default_drag_row(),
            key_step_px: default_key_step(),
        }
    }
}

impl StageConfig {
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn settle_duration(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn nav_mount_delay(&self) -> Duration {
        Duration::from_millis(self.nav_mount_delay_ms)
    }
}

/// Easing curve for slide animations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EasingType {
    /// Jump straight to the end state
    None,
    Linear,
    /// 1 - (1-t)^3
    #[default]
    Cubic,
    /// 1 - (1-t)^5
    Quintic,
    /// 1 - 2^(-10t)
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while a slide animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Length of a page slide; the transition lock ends when it finishes
    #[serde(default = "default_slide_ms")]
    pub slide_ms: u64,
    /// Easing used by page slides
    #[serde(default)]
    pub easing: EasingType,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            slide_ms: default_slide_ms(),
            easing: EasingType::default(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "gruvbox-dark", "nord")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Accept either a bare theme name or a table with `name` and `colors`
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a theme name or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

/// Optional color overrides, each a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    pub bg0: Option<String>,
    pub bg1: Option<String>,
    pub bg2: Option<String>,
    pub fg0: Option<String>,
    pub fg1: Option<String>,
    pub accent: Option<String>,
    pub selection: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
    pub warning: Option<String>,
    pub info: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "<C-j>" (Ctrl+j), "<S-g>" (Shift+g), "<CR>", "<Esc>", "<Tab>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Next page / advance the caption crawl
    #[serde(default = "default_key_page_down")]
    pub page_down: String,
    /// Previous page / rewind the caption crawl
    #[serde(default = "default_key_page_up")]
    pub page_up: String,
    #[serde(default = "default_key_first_page")]
    pub first_page: String,
    #[serde(default = "default_key_last_page")]
    pub last_page: String,
    /// Navbar: introduction entry
    #[serde(default = "default_key_nav_introduction")]
    pub nav_introduction: String,
    /// Navbar: news entry
    #[serde(default = "default_key_nav_news")]
    pub nav_news: String,
    /// Move the selection down inside a list
    #[serde(default = "default_key_move_down")]
    pub move_down: String,
    #[serde(default = "default_key_move_up")]
    pub move_up: String,
    #[serde(default = "default_key_load_more")]
    pub load_more: String,
    #[serde(default = "default_key_open_image")]
    pub open_image: String,
    #[serde(default = "default_key_login")]
    pub login: String,
    #[serde(default = "default_key_logout")]
    pub logout: String,
    #[serde(default = "default_key_manage")]
    pub manage: String,
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            page_down: default_key_page_down(),
            page_up: default_key_page_up(),
            first_page: default_key_first_page(),
            last_page: default_key_last_page(),
            nav_introduction: default_key_nav_introduction(),
            nav_news: default_key_nav_news(),
            move_down: default_key_move_down(),
            move_up: default_key_move_up(),
            load_more: default_key_load_more(),
            open_image: default_key_open_image(),
            login: default_key_login(),
            logout: default_key_logout(),
            manage: default_key_manage(),
            help: default_key_help(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_page_down() -> String { "<PageDown>".to_string() }
fn default_key_page_up() -> String { "<PageUp>".to_string() }
fn default_key_first_page() -> String { "<Home>".to_string() }
fn default_key_last_page() -> String { "<End>".to_string() }
fn default_key_nav_introduction() -> String { "1".to_string() }
fn default_key_nav_news() -> String { "2".to_string() }
fn default_key_move_down() -> String { "j".to_string() }
fn default_key_move_up() -> String { "k".to_string() }
fn default_key_load_more() -> String { "m".to_string() }
fn default_key_open_image() -> String { "o".to_string() }
fn default_key_login() -> String { "L".to_string() }
fn default_key_logout() -> String { "X".to_string() }
fn default_key_manage() -> String { "M".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("feedsite")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_api_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_page_size() -> u32 {
    6
}

fn default_manage_page_size() -> u32 {
    100 // the backend caps page size at 100
}

fn default_wheel_sensitivity() -> f64 {
    0.1
}

fn default_transition_ms() -> u64 {
    1000
}

fn default_settle_ms() -> u64 {
    500
}

fn default_swipe_threshold() -> f64 {
    50.0
}

fn default_nav_mount_delay() -> u64 {
    100
}

fn default_wheel_step() -> f64 {
    100.0
}

fn default_drag_row() -> f64 {
    20.0
}

fn default_key_step() -> f64 {
    100.0
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_slide_ms() -> u64 {
    1000
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file; a missing file yields defaults
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save_to(&self, path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/feedsite/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("feedsite")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// File holding the persisted session token
    pub fn token_path(&self) -> PathBuf {
        self.data_dir().join("token")
    }

    /// Log file used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("feedsite.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_defaults() {
        let config = StageConfig::default();
        assert_eq!(config.wheel_sensitivity, 0.1);
        assert_eq!(config.transition_duration(), Duration::from_millis(1000));
        assert_eq!(config.settle_duration(), Duration::from_millis(500));
        assert_eq!(config.swipe_threshold_px, 50.0);
        assert_eq!(config.nav_mount_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://feed.example.com/api"

            [stage]
            transition_ms = 600
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://feed.example.com/api");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.stage.transition_ms, 600);
        assert_eq!(config.stage.settle_ms, 500);
        assert_eq!(config.news.page_size, 6);
        assert_eq!(config.keymap.nav_news, "2");
    }

    #[test]
    fn test_theme_accepts_string_or_table() {
        let config: UiConfig = toml::from_str(r#"theme = "nord""#).unwrap();
        assert_eq!(config.theme.name, "nord");

        let config: UiConfig = toml::from_str(
            r##"
            [theme]
            name = "dracula"
            colors = { accent = "#ff0000" }
            "##,
        )
        .unwrap();
        assert_eq!(config.theme.name, "dracula");
        assert_eq!(config.theme.colors.accent.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_easing_parses_lowercase() {
        let config: UiConfig = toml::from_str(r#"easing = "quintic""#).unwrap();
        assert_eq!(config.easing, EasingType::Quintic);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("feedsite-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");

        let mut config = AppConfig::default();
        config.news.page_size = 12;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.news.page_size, 12);
        assert_eq!(loaded.stage, StageConfig::default());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join(format!("feedsite-missing-{}.toml", uuid::Uuid::new_v4()));
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
    }
}
