use async_trait::async_trait;

use crate::core::models::{SearchConfig, SearchError, SearchPage};

#[async_trait]
pub trait SearchPageFetcher: Send + Sync {
    /// Fetches the page whose first result sits at the 1-based `page_start`.
    async fn fetch_page(
        &self,
        config: &SearchConfig,
        page_start: u64,
    ) -> Result<SearchPage, SearchError>;
}
