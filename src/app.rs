use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::Mutex;

use crate::adapters::CsvExportSink;
use crate::config_store::ConfigStore;
use crate::core::interfaces::adapters::SearchPageFetcher;
use crate::core::models::{
    ConfigError, ExportError, SearchConfig, SearchResponse, SubmissionError,
};
use crate::core::orchestrators::result_aggregator::ResultAggregator;
use crate::global_constants;
use crate::presentation;

/// Raw form fields as posted by the page. `Days` stays a string until
/// validation so a non-numeric value can be reported inline.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    #[serde(rename = "ApiKey", default)]
    pub api_key: String,
    #[serde(rename = "SearchId", default)]
    pub search_engine_id: String,
    #[serde(rename = "Query", default)]
    pub query: String,
    #[serde(rename = "Days", default)]
    pub days: String,
}

impl SearchForm {
    pub fn into_config(self) -> Result<SearchConfig, SubmissionError> {
        let day_restrict = self.days.trim().parse::<i64>().map_err(|_| {
            SubmissionError::Validation(global_constants::USER_MESSAGE_DAYS_NOT_A_NUMBER.to_string())
        })?;

        Ok(SearchConfig::new(
            self.api_key,
            self.search_engine_id,
            self.query,
            day_restrict,
        ))
    }
}

#[derive(Debug, Default)]
struct AppState {
    config: SearchConfig,
    last_response: Option<SearchResponse>,
}

pub struct SearchApp {
    config_store: ConfigStore,
    aggregator: ResultAggregator,
    export_sink: CsvExportSink,
    state: Mutex<AppState>,
}

impl SearchApp {
    pub fn build(
        config_store: ConfigStore,
        page_fetcher: Arc<dyn SearchPageFetcher>,
        export_sink: CsvExportSink,
    ) -> Result<Self, ConfigError> {
        log::info!("{} Initializing application", global_constants::LOG_TAG_MAIN);

        let config = config_store.load()?;

        Ok(Self {
            config_store,
            aggregator: ResultAggregator::new(page_fetcher),
            export_sink,
            state: Mutex::new(AppState {
                config,
                last_response: None,
            }),
        })
    }

    pub async fn render(&self, banner: Option<&str>) -> askama::Result<String> {
        let state = self.state.lock().await;
        presentation::render_page(&state.config, state.last_response.as_ref(), banner)
    }

    /// Validates the form, persists it and runs a full search. The state lock
    /// is held throughout so submissions never interleave.
    pub async fn submit(&self, form: SearchForm) -> Result<(), SubmissionError> {
        let config = form.into_config()?;

        let mut state = self.state.lock().await;
        self.config_store.save(&config)?;
        state.config = config;

        match self.aggregator.aggregate(&state.config).await {
            Ok(response) => {
                state.last_response = Some(response);
                Ok(())
            }
            Err(error) => {
                state.last_response = None;
                Err(error.into())
            }
        }
    }

    pub async fn export(&self) -> Result<&Path, ExportError> {
        let state = self.state.lock().await;
        let records = state
            .last_response
            .as_ref()
            .map(|response| response.records.as_slice())
            .unwrap_or_default();

        self.export_sink.export(records)?;
        Ok(self.export_sink.export_path())
    }

    #[cfg(test)]
    pub async fn current_config(&self) -> SearchConfig {
        self.state.lock().await.config.clone()
    }

    #[cfg(test)]
    pub async fn last_record_count(&self) -> Option<usize> {
        self.state
            .lock()
            .await
            .last_response
            .as_ref()
            .map(|response| response.records.len())
    }
}
