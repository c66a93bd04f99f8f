pub mod app;
pub mod event;
pub mod form;
pub mod input;
pub mod keymap;
pub mod motion;
pub mod theme;
pub mod themes;
pub mod widgets;

pub use app::{App, Command};
pub use theme::Theme;
pub use themes::load_theme;
