use std::sync::Arc;

use juggle_core::model::{NewsArticle, NewsCategory, NewsId};
use storage::records::NewsRecord;
use storage::repository::{NewsRepository, StorageError};

use crate::api::ApiClient;
use crate::config::Endpoint;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewsFilter {
    pub query: String,
    pub category: Option<NewsCategory>,
}

impl NewsFilter {
    #[must_use]
    pub fn matches(&self, article: &NewsArticle) -> bool {
        let needle = self.query.trim().to_lowercase();
        self.category.is_none_or(|c| article.category == c) && article.matches_text(&needle)
    }

    #[must_use]
    pub fn apply(&self, articles: &[NewsArticle]) -> Vec<NewsArticle> {
        articles.iter().filter(|a| self.matches(a)).cloned().collect()
    }
}

#[derive(Clone)]
pub struct NewsService {
    api: ApiClient,
    repo: Arc<dyn NewsRepository>,
}

impl NewsService {
    #[must_use]
    pub fn new(api: ApiClient, repo: Arc<dyn NewsRepository>) -> Self {
        Self { api, repo }
    }

    /// Articles, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only if the local fallback cannot be read.
    pub async fn all_news(&self) -> Result<Vec<NewsArticle>, StorageError> {
        let mut articles = if self.api.config().is_configured() {
            let fallback = self.repo.list_news().await?;
            let records: Option<Vec<NewsRecord>> = self.api.get_or(Endpoint::News, None).await;
            match records {
                Some(records) => records.into_iter().map(NewsRecord::into_article).collect(),
                None => fallback,
            }
        } else {
            self.repo.list_news().await?
        };
        articles.sort_by(|a, b| b.published_on.cmp(&a.published_on).then(a.id.cmp(&b.id)));
        Ok(articles)
    }

    /// # Errors
    ///
    /// Returns `StorageError` only if the local fallback cannot be read.
    pub async fn news_by_id(&self, id: NewsId) -> Result<Option<NewsArticle>, StorageError> {
        let articles = self.all_news().await?;
        Ok(articles.into_iter().find(|a| a.id == id))
    }

    /// # Errors
    ///
    /// Returns `StorageError` only if the local fallback cannot be read.
    pub async fn filter(&self, filter: &NewsFilter) -> Result<Vec<NewsArticle>, StorageError> {
        let articles = self.all_news().await?;
        Ok(filter.apply(&articles))
    }
}
