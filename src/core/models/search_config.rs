use serde::{Deserialize, Serialize};

/// The last-used search parameters, persisted between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchConfig {
    #[serde(rename = "ApiKey", default)]
    pub api_key: String,
    #[serde(rename = "SearchId", default)]
    pub search_engine_id: String,
    #[serde(rename = "Query", default)]
    pub query: String,
    #[serde(rename = "Days", default)]
    pub day_restrict: i64,
}

impl SearchConfig {
    pub fn new(
        api_key: impl Into<String>,
        search_engine_id: impl Into<String>,
        query: impl Into<String>,
        day_restrict: i64,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            search_engine_id: search_engine_id.into(),
            query: query.into(),
            day_restrict,
        }
    }
}
