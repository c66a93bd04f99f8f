//! Page slide animation
//!
//! - `easing` maps linear time to eased progress
//! - `slide` turns a stage transition into per-section row offsets

pub mod easing;
pub mod slide;

pub use easing::{EasingType, EasingTypeExt};
pub use slide::{slide_rect, Slide};
