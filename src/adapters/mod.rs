mod csv_export_sink;
mod google_custom_search_client;

pub use csv_export_sink::CsvExportSink;
pub use google_custom_search_client::GoogleCustomSearchClient;
