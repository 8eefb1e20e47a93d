use askama::Template;

use crate::core::models::{ResultRecord, SearchConfig, SearchResponse};
use crate::global_constants;

struct ResultRow<'a> {
    title: &'a str,
    link: &'a str,
    snippet: &'a str,
    published_date: &'a str,
}

impl<'a> From<&'a ResultRecord> for ResultRow<'a> {
    fn from(record: &'a ResultRecord) -> Self {
        Self {
            title: &record.title,
            link: &record.link,
            snippet: &record.snippet,
            published_date: record.published_date.as_deref().unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexView<'a> {
    application_name: &'a str,
    banner: &'a str,
    api_key: &'a str,
    search_engine_id: &'a str,
    query: &'a str,
    day_restrict: i64,
    has_results: bool,
    total_results: u64,
    rows: Vec<ResultRow<'a>>,
}

/// Renders the search form prefilled from `config`, followed by the results
/// of the last search when there is one.
pub fn render_page(
    config: &SearchConfig,
    response: Option<&SearchResponse>,
    banner: Option<&str>,
) -> askama::Result<String> {
    let view = IndexView {
        application_name: global_constants::APPLICATION_NAME,
        banner: banner.unwrap_or_default(),
        api_key: &config.api_key,
        search_engine_id: &config.search_engine_id,
        query: &config.query,
        day_restrict: config.day_restrict,
        has_results: response.is_some(),
        total_results: response.map_or(0, |r| r.total_results),
        rows: response
            .map(|r| r.records.iter().map(ResultRow::from).collect())
            .unwrap_or_default(),
    };

    view.render()
}
