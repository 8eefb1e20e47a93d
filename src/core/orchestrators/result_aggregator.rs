use std::sync::Arc;

use crate::core::interfaces::adapters::SearchPageFetcher;
use crate::core::models::{SearchConfig, SearchError, SearchResponse};
use crate::global_constants;

pub struct ResultAggregator {
    page_fetcher: Arc<dyn SearchPageFetcher>,
}

impl ResultAggregator {
    pub fn new(page_fetcher: Arc<dyn SearchPageFetcher>) -> Self {
        Self { page_fetcher }
    }

    /// Fetches every page the first response declares and concatenates them in
    /// page order. The first failing page aborts the whole search.
    pub async fn aggregate(&self, config: &SearchConfig) -> Result<SearchResponse, SearchError> {
        log::info!(
            "{} Searching for {:?} (last {} days)",
            global_constants::LOG_TAG_AGGREGATOR,
            config.query,
            config.day_restrict
        );

        let first_page = self
            .page_fetcher
            .fetch_page(config, page_start_for(1))
            .await?;
        let mut response = SearchResponse::from_first_page(first_page);

        let page_count = page_count_for(response.total_results);
        log::debug!(
            "{} totalResults={}, fetching {} page(s)",
            global_constants::LOG_TAG_AGGREGATOR,
            response.total_results,
            page_count
        );

        for page in 2..=page_count {
            let page_start = page_start_for(page);
            match self.page_fetcher.fetch_page(config, page_start).await {
                Ok(next_page) => response.append_page(next_page),
                Err(error) => {
                    log::warn!(
                        "{} Page {} (start={}) failed, discarding {} earlier record(s): {}",
                        global_constants::LOG_TAG_AGGREGATOR,
                        page,
                        page_start,
                        response.records.len(),
                        error
                    );
                    return Err(error);
                }
            }
        }

        log::info!(
            "{} Collected {} record(s) of {} declared",
            global_constants::LOG_TAG_AGGREGATOR,
            response.records.len(),
            response.total_results
        );

        Ok(response)
    }
}

fn page_count_for(total_results: u64) -> u64 {
    total_results
        .div_ceil(global_constants::RESULTS_PER_PAGE)
        .clamp(1, global_constants::MAX_RESULT_PAGES)
}

fn page_start_for(page: u64) -> u64 {
    (page - 1) * global_constants::RESULTS_PER_PAGE + 1
}
