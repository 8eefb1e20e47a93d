use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::time::Duration;

use crate::core::interfaces::adapters::SearchPageFetcher;
use crate::core::models::{ResultRecord, SearchConfig, SearchError, SearchPage};
use crate::global_constants;

const DC_DATE_KEYS: [&str; 3] = ["dc.date", "DC.date", "dc.date.issued"];
const PUBLISHED_TIME_KEYS: [&str; 3] = [
    "article:published_time",
    "og:published_time",
    "datePublished",
];
const COMPACT_DATE_KEYS: [&str; 8] = [
    "20060102",
    "date",
    "pubdate",
    "publishdate",
    "publish-date",
    "publish_date",
    "article_date",
    "original-publish-date",
];

pub struct GoogleCustomSearchClient {
    http_client: reqwest::Client,
    api_url: String,
}

impl GoogleCustomSearchClient {
    pub fn new() -> Result<Self> {
        Self::with_api_url(global_constants::CUSTOM_SEARCH_API_URL)
    }

    pub fn with_api_url(api_url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(
                global_constants::SEARCH_REQUEST_TIMEOUT_SECONDS,
            ))
            .user_agent(global_constants::CUSTOM_SEARCH_USER_AGENT)
            .build()?;

        Ok(Self {
            http_client,
            api_url: api_url.into(),
        })
    }

    fn construct_search_url(&self, config: &SearchConfig, page_start: u64) -> String {
        format!(
            "{}?key={}&cx={}&q={}&dateRestrict=d{}&start={}",
            self.api_url,
            urlencoding::encode(&config.api_key),
            urlencoding::encode(&config.search_engine_id),
            urlencoding::encode(&config.query),
            config.day_restrict,
            page_start
        )
    }
}

#[async_trait]
impl SearchPageFetcher for GoogleCustomSearchClient {
    async fn fetch_page(
        &self,
        config: &SearchConfig,
        page_start: u64,
    ) -> Result<SearchPage, SearchError> {
        let search_url = self.construct_search_url(config, page_start);
        log::debug!(
            "{} GET {}",
            global_constants::LOG_TAG_SEARCH,
            redact_api_key(&search_url, &config.api_key)
        );

        let response = self
            .http_client
            .get(&search_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(describe_request_failure)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(describe_request_failure)?;

        if !status.is_success() {
            log::warn!(
                "{} API returned {} for start={}",
                global_constants::LOG_TAG_SEARCH,
                status,
                page_start
            );
            return Err(SearchError::Network(describe_api_failure(status, &body)));
        }

        let page = decode_page(&body)?;
        log::info!(
            "{} Page start={} returned {} record(s)",
            global_constants::LOG_TAG_SEARCH,
            page_start,
            page.records.len()
        );
        Ok(page)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomSearchEnvelope {
    search_information: Option<SearchInformation>,
    items: Option<Vec<CustomSearchItem>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchInformation {
    #[serde(deserialize_with = "deserialize_total_results")]
    total_results: u64,
}

#[derive(Debug, Deserialize)]
struct CustomSearchItem {
    title: String,
    link: String,
    snippet: String,
    #[serde(default)]
    pagemap: Option<PageMap>,
}

#[derive(Debug, Default, Deserialize)]
struct PageMap {
    #[serde(default)]
    metatags: Vec<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TotalResultsField {
    Text(String),
    Number(u64),
}

fn deserialize_total_results<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match TotalResultsField::deserialize(deserializer)? {
        TotalResultsField::Number(total) => Ok(total),
        TotalResultsField::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid totalResults {:?}", text))),
    }
}

fn decode_page(body: &str) -> Result<SearchPage, SearchError> {
    let envelope: CustomSearchEnvelope =
        serde_json::from_str(body).map_err(|e| SearchError::Format(e.to_string()))?;

    let total_results = envelope
        .search_information
        .map(|info| info.total_results)
        .ok_or_else(|| SearchError::Format("missing searchInformation.totalResults".to_string()))?;

    let items = match envelope.items {
        Some(items) => items,
        None if total_results == 0 => Vec::new(),
        None => return Err(SearchError::Format("missing items list".to_string())),
    };

    let records = items
        .into_iter()
        .map(|item| {
            let published_date = item
                .pagemap
                .as_ref()
                .and_then(|pagemap| extract_published_date(&pagemap.metatags));
            ResultRecord::new(item.title, item.link, item.snippet, published_date)
        })
        .collect();

    Ok(SearchPage {
        total_results,
        records,
    })
}

fn extract_published_date(metatags: &[Map<String, Value>]) -> Option<String> {
    find_tag_value(metatags, &DC_DATE_KEYS)
        .map(str::to_string)
        .or_else(|| {
            find_tag_value(metatags, &PUBLISHED_TIME_KEYS)
                .map(|value| value.chars().take(10).collect())
        })
        .or_else(|| {
            metatags.iter().find_map(|tags| {
                COMPACT_DATE_KEYS
                    .iter()
                    .filter_map(|key| tags.get(*key))
                    .filter_map(Value::as_str)
                    .find_map(reformat_compact_date)
            })
        })
}

fn find_tag_value<'a>(metatags: &'a [Map<String, Value>], keys: &[&str]) -> Option<&'a str> {
    metatags.iter().find_map(|tags| {
        keys.iter()
            .filter_map(|key| tags.get(*key))
            .filter_map(Value::as_str)
            .map(str::trim)
            .find(|value| !value.is_empty())
    })
}

fn reformat_compact_date(value: &str) -> Option<String> {
    let value = value.trim();
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let month: u32 = value[4..6].parse().ok()?;
    let day: u32 = value[6..8].parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    Some(format!("{}-{}-{}", &value[..4], &value[4..6], &value[6..8]))
}

fn describe_api_failure(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => format!("HTTP {}: {}", status, envelope.error.message),
        Err(_) => format!("HTTP {}", status),
    }
}

/// Joins the error with its `source()` chain; the URL is stripped because it
/// carries the API key.
fn describe_request_failure(error: reqwest::Error) -> SearchError {
    let error = error.without_url();
    let mut message = error.to_string();
    let mut source = std::error::Error::source(&error);
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = std::error::Error::source(cause);
    }
    SearchError::Network(message)
}

fn redact_api_key(url: &str, api_key: &str) -> String {
    if api_key.is_empty() {
        return url.to_string();
    }
    let encoded_key = urlencoding::encode(api_key);
    url.replace(&*encoded_key, "***")
}
