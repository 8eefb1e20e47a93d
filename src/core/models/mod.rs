mod errors;
mod result_record;
mod search_config;
mod search_response;

pub use errors::{ConfigError, ExportError, SearchError, SubmissionError};
pub use result_record::ResultRecord;
pub use search_config::SearchConfig;
pub use search_response::{SearchPage, SearchResponse};
