mod captions;
mod form_view;
mod home;
mod manage;
mod navbar;
mod news_grid;
mod popup;
mod status_bar;

pub use captions::{caption_row, CaptionsWidget};
pub use form_view::{centered_rect, FormWidget};
pub use home::HomeWidget;
pub use manage::ManageWidget;
pub use navbar::{nav_slots, nav_target_at, NavSlot, NavTarget, NavbarWidget};
pub use news_grid::NewsGridWidget;
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;
