mod adapters;
mod app;
mod config_store;
mod core;
mod global_constants;
mod presentation;
mod server;
mod utils;

use std::sync::Arc;

use adapters::{CsvExportSink, GoogleCustomSearchClient};
use app::SearchApp;
use config_store::ConfigStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    log::info!(
        "{} Starting {}",
        global_constants::LOG_TAG_MAIN,
        global_constants::APPLICATION_NAME
    );

    let config_store = ConfigStore::default_location();
    log::info!(
        "{} Using config file {:?}",
        global_constants::LOG_TAG_MAIN,
        config_store.config_path()
    );
    let page_fetcher = Arc::new(GoogleCustomSearchClient::new()?);
    let export_sink = CsvExportSink::new(global_constants::EXPORT_FILE_NAME);

    let app = match SearchApp::build(config_store, page_fetcher, export_sink) {
        Ok(app) => Arc::new(app),
        Err(error) => {
            log::error!("{} {}", global_constants::LOG_TAG_MAIN, error);
            return Err(error.into());
        }
    };

    let bind_address = format!(
        "{}:{}",
        global_constants::SERVER_BIND_ADDRESS,
        global_constants::SERVER_PORT
    );
    let listener = server::bind_listener(&bind_address).await?;

    println!("{}", global_constants::STARTUP_BANNER);
    utils::open_in_browser(&utils::local_url(global_constants::SERVER_PORT));

    server::run_server(app, listener).await
}
