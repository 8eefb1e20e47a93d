use super::ResultRecord;

/// One page as returned by a single API call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub total_results: u64,
    pub records: Vec<ResultRecord>,
}

/// All pages of one search, concatenated in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResponse {
    pub total_results: u64,
    pub records: Vec<ResultRecord>,
}

impl SearchResponse {
    pub fn from_first_page(page: SearchPage) -> Self {
        Self {
            total_results: page.total_results,
            records: page.records,
        }
    }

    pub fn append_page(&mut self, page: SearchPage) {
        self.records.extend(page.records);
    }
}
