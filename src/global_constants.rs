pub const APPLICATION_NAME: &str = "Custom Search Web";
pub const APPLICATION_DIR_NAME: &str = "custom-search-web";

pub const LOG_TAG_MAIN: &str = "[MAIN]";
pub const LOG_TAG_CONFIG: &str = "[CONFIG]";
pub const LOG_TAG_SEARCH: &str = "[SEARCH]";
pub const LOG_TAG_AGGREGATOR: &str = "[AGGREGATOR]";
pub const LOG_TAG_SERVER: &str = "[SERVER]";
pub const LOG_TAG_EXPORT: &str = "[EXPORT]";
pub const LOG_TAG_BROWSER: &str = "[BROWSER]";

pub const SERVER_BIND_ADDRESS: &str = "127.0.0.1";
pub const SERVER_PORT: u16 = 8080;

pub const CUSTOM_SEARCH_API_URL: &str = "https://www.googleapis.com/customsearch/v1";
pub const CUSTOM_SEARCH_USER_AGENT: &str = "custom-search-web/0.1";
pub const SEARCH_REQUEST_TIMEOUT_SECONDS: u64 = 20;

pub const RESULTS_PER_PAGE: u64 = 10;
/// The API refuses `start` values that would reach past the 100th result.
pub const MAX_RESULT_PAGES: u64 = 10;

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const EXPORT_FILE_NAME: &str = "output.csv";

pub const CSV_HEADER: [&str; 4] = ["Title", "Link", "Snippet", "Date"];

pub const USER_MESSAGE_DAYS_NOT_A_NUMBER: &str = "Please enter a number of Days";
pub const USER_MESSAGE_EXPORT_SAVED: &str = "Output saved as";
pub const USER_MESSAGE_EXPORT_FAILED: &str = "Error saving:";

pub const STARTUP_BANNER: &str = r#"
╔════════════════════════════════════════════════════════╗
║  Custom Search Web                                     ║
║                                                        ║
║  Serving on http://localhost:8080                      ║
║                                                        ║
║  Submit the form to run a search                       ║
║  Visit /export to save results as CSV                  ║
║  Press Ctrl+C to exit                                  ║
║                                                        ║
╚════════════════════════════════════════════════════════╝
"#;
