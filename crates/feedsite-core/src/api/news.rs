use std::sync::Arc;

use async_trait::async_trait;

use super::client::ApiClient;
use super::models::{NewsDraft, NewsItem, NewsPage, NewsPatch, NewsQuery};
use crate::news::NewsSource;
use crate::{Error, Result};

/// News endpoints under `/news`
#[derive(Clone)]
pub struct NewsService {
    client: Arc<ApiClient>,
}

impl NewsService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: NewsQuery) -> Result<NewsPage> {
        self.client.get("/news", &query.to_pairs()).await
    }

    pub async fn get(&self, id: i64) -> Result<NewsItem> {
        self.client.get(&format!("/news/{}", id), &[]).await.map_err(|e| match e {
            Error::Api { status: 404, .. } => Error::NotFound(id.to_string()),
            other => other,
        })
    }

    pub async fn create(&self, draft: &NewsDraft) -> Result<NewsItem> {
        self.require_session()?;
        let draft = draft.validated()?;
        let item: NewsItem = self.client.post("/news", &draft).await?;
        tracing::info!(id = item.id, "Created news item");
        Ok(item)
    }

    pub async fn update(&self, id: i64, patch: &NewsPatch) -> Result<NewsItem> {
        self.require_session()?;
        let patch = patch.validated()?;
        let item: NewsItem = self.client.put(&format!("/news/{}", id), &patch).await?;
        tracing::info!(id, "Updated news item");
        Ok(item)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.require_session()?;
        self.client.delete(&format!("/news/{}", id)).await?;
        tracing::info!(id, "Deleted news item");
        Ok(())
    }

    fn require_session(&self) -> Result<()> {
        if self.client.has_token() {
            Ok(())
        } else {
            Err(Error::Unauthorized)
        }
    }
}

#[async_trait]
impl NewsSource for NewsService {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<NewsPage> {
        self.list(NewsQuery::new(page, limit)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> NewsService {
        let client = ApiClient::with_http(reqwest::Client::new(), "http://127.0.0.1:9").unwrap();
        NewsService::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_writes_require_session() {
        let news = service();
        let draft = NewsDraft::new("t", "d", None);
        assert!(news.create(&draft).await.unwrap_err().is_unauthorized());
        assert!(news.update(1, &NewsPatch::from(draft)).await.unwrap_err().is_unauthorized());
        assert!(news.delete(1).await.unwrap_err().is_unauthorized());
    }
}
