//! Full-page scroll stage of the home route
//!
//! The introduction page plays a caption crawl that must finish before the
//! pager lets the user move on to the news page. [`Stage`] owns both parts;
//! [`Navbar`] mirrors what the stage reports.

mod controller;
mod full_page;
mod navbar;
mod observer;
mod scroll_text;
mod section;

pub use controller::{Stage, StageInput};
pub use full_page::{FullPageScroll, PageChange, PageKey, Rejection};
pub use navbar::{NavClick, NavRequest, Navbar};
pub use observer::{NullObserver, StageEvent, StageObserver};
pub use scroll_text::{
    introduction_captions, Caption, LineStyle, ScrollText, ScrollTextObserver, PROGRESS_MAX,
};
pub use section::{AnimationHint, Section, SectionMotion, TransitionDirection, PAGE_COUNT};
