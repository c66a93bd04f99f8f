use async_trait::async_trait;

use crate::api::{NewsItem, NewsPage};
use crate::Result;

/// Anything that can serve pages of news
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<NewsPage>;
}

/// What a load attempt did to the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Items were replaced or appended
    Loaded { added: usize },
    /// Nothing left to fetch, or a load is already running
    Skipped,
}

/// Paginated, append-only list backing the news section
///
/// Pages are 1-based. A failed load leaves items and page untouched.
#[derive(Debug, Clone)]
pub struct NewsFeed {
    items: Vec<NewsItem>,
    page: u32,
    total_pages: u32,
    total: u64,
    page_size: u32,
    loading: bool,
    loaded_once: bool,
}

impl NewsFeed {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            total_pages: 1,
            total: 0,
            page_size: page_size.max(1),
            loading: false,
            loaded_once: false,
        }
    }

    pub fn items(&self) -> &[NewsItem] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded_once
    }

    /// More pages exist beyond the ones already shown
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    /// Fetch page 1 and replace whatever is shown
    pub async fn load_first(&mut self, source: &dyn NewsSource) -> Result<LoadOutcome> {
        if self.loading {
            return Ok(LoadOutcome::Skipped);
        }
        self.loading = true;
        let result = source.fetch_page(1, self.page_size).await;
        self.loading = false;

        let response = result?;
        let added = response.items.len();
        self.items = response.items;
        self.page = 1;
        self.total_pages = response.pages;
        self.total = response.total;
        self.loaded_once = true;
        Ok(LoadOutcome::Loaded { added })
    }

    /// Fetch the next page and append it
    pub async fn load_more(&mut self, source: &dyn NewsSource) -> Result<LoadOutcome> {
        if self.loading || !self.has_more() {
            return Ok(LoadOutcome::Skipped);
        }
        let next = self.page + 1;
        self.loading = true;
        let result = source.fetch_page(next, self.page_size).await;
        self.loading = false;

        let response = result?;
        let added = response.items.len();
        self.apply_page(next, response);
        Ok(LoadOutcome::Loaded { added })
    }

    /// Merge a page fetched elsewhere (e.g. from a background task)
    pub fn apply_page(&mut self, page: u32, response: NewsPage) {
        if page <= 1 {
            self.items = response.items;
        } else {
            self.items.extend(response.items);
        }
        self.page = page.max(1);
        self.total_pages = response.pages;
        self.total = response.total;
        self.loaded_once = true;
    }

    /// Next page to request, if any
    pub fn next_page(&self) -> Option<u32> {
        self.has_more().then_some(self.page + 1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::sync::Mutex;

    fn item(id: i64) -> NewsItem {
        NewsItem {
            id,
            title: format!("News {}", id),
            description: "body".to_string(),
            image_url: None,
            creator_id: Some(1),
            created_at: None,
            updated_at: None,
            creator: None,
        }
    }

    /// Serves `pages` pages of two items each; can be told to fail
    struct FakeSource {
        pages: u32,
        fail: Mutex<bool>,
        requests: Mutex<Vec<(u32, u32)>>,
    }

    impl FakeSource {
        fn new(pages: u32) -> Self {
            Self {
                pages,
                fail: Mutex::new(false),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl NewsSource for FakeSource {
        async fn fetch_page(&self, page: u32, limit: u32) -> Result<NewsPage> {
            self.requests.lock().unwrap().push((page, limit));
            if *self.fail.lock().unwrap() {
                return Err(Error::Api {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            let base = (page as i64 - 1) * 2;
            Ok(NewsPage {
                items: vec![item(base + 1), item(base + 2)],
                total: self.pages as u64 * 2,
                pages: self.pages,
                page,
                size: limit,
            })
        }
    }

    #[tokio::test]
    async fn test_load_first_then_more() {
        let source = FakeSource::new(2);
        let mut feed = NewsFeed::new(6);

        feed.load_first(&source).await.unwrap();
        assert_eq!(feed.items().len(), 2);
        assert!(feed.has_more());

        let outcome = feed.load_more(&source).await.unwrap();
        assert_eq!(outcome, LoadOutcome::Loaded { added: 2 });
        assert_eq!(feed.page(), 2);
        assert_eq!(
            feed.items().iter().map(|n| n.id).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
        assert!(!feed.has_more());
        assert_eq!(feed.load_more(&source).await.unwrap(), LoadOutcome::Skipped);
        assert_eq!(*source.requests.lock().unwrap(), vec![(1, 6), (2, 6)]);
    }

    #[tokio::test]
    async fn test_failed_load_more_keeps_list() {
        let source = FakeSource::new(3);
        let mut feed = NewsFeed::new(2);
        feed.load_first(&source).await.unwrap();

        *source.fail.lock().unwrap() = true;
        assert!(feed.load_more(&source).await.is_err());
        assert_eq!(feed.items().len(), 2);
        assert_eq!(feed.page(), 1);
        assert!(!feed.is_loading());
        assert_eq!(feed.next_page(), Some(2));
    }

    #[tokio::test]
    async fn test_reload_replaces_items() {
        let source = FakeSource::new(2);
        let mut feed = NewsFeed::new(2);
        feed.load_first(&source).await.unwrap();
        feed.load_more(&source).await.unwrap();
        feed.load_first(&source).await.unwrap();
        assert_eq!(feed.items().len(), 2);
        assert_eq!(feed.page(), 1);
    }
}
