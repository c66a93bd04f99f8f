mod card;
mod feed;

pub use card::{image_label, truncate_description, IMAGE_PLACEHOLDER};
pub use feed::{LoadOutcome, NewsFeed, NewsSource};
