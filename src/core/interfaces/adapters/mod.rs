mod search_page_fetcher;

pub use search_page_fetcher::SearchPageFetcher;
