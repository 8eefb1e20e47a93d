use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Router};
use tokio::net::TcpListener;

use crate::app::{SearchApp, SearchForm};
use crate::core::models::SubmissionError;
use crate::global_constants;

pub fn build_router(app: Arc<SearchApp>) -> Router {
    Router::new()
        .route("/", get(show_page).post(submit_search))
        .route("/export", get(export_results))
        .route("/favicon.ico", get(|| async { StatusCode::NOT_FOUND }))
        .with_state(app)
}

pub async fn bind_listener(addr: &str) -> anyhow::Result<TcpListener> {
    let listener = TcpListener::bind(addr).await?;
    log::info!(
        "{} Listening on {}",
        global_constants::LOG_TAG_SERVER,
        listener.local_addr()?
    );
    Ok(listener)
}

pub async fn run_server(app: Arc<SearchApp>, listener: TcpListener) -> anyhow::Result<()> {
    axum::serve(listener, build_router(app)).await?;
    Ok(())
}

async fn show_page(State(app): State<Arc<SearchApp>>) -> Response {
    render_with_status(&app, StatusCode::OK, None).await
}

async fn submit_search(
    State(app): State<Arc<SearchApp>>,
    Form(form): Form<SearchForm>,
) -> Response {
    match app.submit(form).await {
        Ok(()) => render_with_status(&app, StatusCode::OK, None).await,
        Err(error) => {
            let status = match &error {
                SubmissionError::Validation(_) => StatusCode::BAD_REQUEST,
                SubmissionError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
                SubmissionError::Search(_) => StatusCode::BAD_GATEWAY,
            };
            log::warn!(
                "{} Submission failed ({}): {}",
                global_constants::LOG_TAG_SERVER,
                status,
                error
            );
            let banner = format!("Error: {}", error);
            render_with_status(&app, status, Some(&banner)).await
        }
    }
}

async fn export_results(State(app): State<Arc<SearchApp>>) -> Response {
    match app.export().await {
        Ok(path) => format!(
            "{} {}",
            global_constants::USER_MESSAGE_EXPORT_SAVED,
            path.display()
        )
        .into_response(),
        Err(error) => {
            log::error!("{} {}", global_constants::LOG_TAG_EXPORT, error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{} {}", global_constants::USER_MESSAGE_EXPORT_FAILED, error),
            )
                .into_response()
        }
    }
}

async fn render_with_status(app: &SearchApp, status: StatusCode, banner: Option<&str>) -> Response {
    match app.render(banner).await {
        Ok(html) => (status, Html(html)).into_response(),
        Err(error) => {
            log::error!(
                "{} Failed to render page: {}",
                global_constants::LOG_TAG_SERVER,
                error
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::CsvExportSink;
    use crate::config_store::ConfigStore;
    use crate::core::interfaces::adapters::SearchPageFetcher;
    use crate::core::models::{ResultRecord, SearchConfig, SearchError, SearchPage};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request};
    use std::sync::Mutex;
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct MockPageFetcher {
        total_results: u64,
        fail: bool,
        fetch_count: Arc<Mutex<usize>>,
    }

    impl MockPageFetcher {
        fn returning(total_results: u64) -> Self {
            Self {
                total_results,
                fail: false,
                fetch_count: Arc::new(Mutex::new(0)),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::returning(0)
            }
        }
    }

    #[async_trait]
    impl SearchPageFetcher for MockPageFetcher {
        async fn fetch_page(
            &self,
            _config: &SearchConfig,
            page_start: u64,
        ) -> Result<SearchPage, SearchError> {
            *self.fetch_count.lock().unwrap() += 1;
            if self.fail {
                return Err(SearchError::Format("missing items list".to_string()));
            }

            let remaining = self.total_results.saturating_sub(page_start - 1);
            let records = (0..remaining.min(10))
                .map(|offset| {
                    let position = page_start + offset;
                    ResultRecord::new(
                        format!("Result, number {}", position),
                        format!("https://example.com/{}", position),
                        "snippet",
                        None,
                    )
                })
                .collect();

            Ok(SearchPage {
                total_results: self.total_results,
                records,
            })
        }
    }

    fn create_test_app(fetcher: MockPageFetcher) -> (Arc<SearchApp>, TempDir) {
        let temp_dir = tempfile::tempdir().unwrap();
        let app = SearchApp::build(
            ConfigStore::at(temp_dir.path().join("config.json")),
            Arc::new(fetcher),
            CsvExportSink::new(temp_dir.path().join("output.csv")),
        )
        .unwrap();
        (Arc::new(app), temp_dir)
    }

    fn create_form_request(body: &str) -> Request<Body> {
        Request::post("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_body(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_get_index_renders_form() {
        let (app, _temp_dir) = create_test_app(MockPageFetcher::returning(0));

        let response = build_router(app)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_body(response).await;
        assert!(body.contains("name=\"Query\""));
    }

    #[tokio::test]
    async fn test_submit_renders_results_and_export_writes_them() {
        let (app, temp_dir) = create_test_app(MockPageFetcher::returning(3));
        let router = build_router(app.clone());

        let response = router
            .clone()
            .oneshot(create_form_request(
                "ApiKey=K&SearchId=C&Query=corona&Days=1",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_body(response).await;
        assert_eq!(body.matches("class=\"result\"").count(), 3);
        assert_eq!(
            app.current_config().await,
            SearchConfig::new("K", "C", "corona", 1)
        );

        let saved = ConfigStore::at(temp_dir.path().join("config.json"))
            .load()
            .unwrap();
        assert_eq!(saved, SearchConfig::new("K", "C", "corona", 1));

        let response = router
            .oneshot(Request::get("/export").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(read_body(response).await.starts_with("Output saved as"));

        let mut reader = csv::Reader::from_path(temp_dir.path().join("output.csv")).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "Result, number 1");
    }

    #[tokio::test]
    async fn test_submit_with_non_integer_days_is_rejected_without_saving() {
        let fetcher = MockPageFetcher::returning(3);
        let fetch_count = fetcher.fetch_count.clone();
        let (app, temp_dir) = create_test_app(fetcher);

        let response = build_router(app.clone())
            .oneshot(create_form_request(
                "ApiKey=K&SearchId=C&Query=corona&Days=many",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(read_body(response)
            .await
            .contains(global_constants::USER_MESSAGE_DAYS_NOT_A_NUMBER));
        assert_eq!(*fetch_count.lock().unwrap(), 0);
        assert_eq!(app.current_config().await, SearchConfig::default());

        let saved = ConfigStore::at(temp_dir.path().join("config.json"))
            .load()
            .unwrap();
        assert_eq!(saved, SearchConfig::default());
    }

    #[tokio::test]
    async fn test_failed_search_shows_banner_and_clears_results() {
        let (app, _temp_dir) = create_test_app(MockPageFetcher::failing());

        let response = build_router(app.clone())
            .oneshot(create_form_request(
                "ApiKey=K&SearchId=C&Query=corona&Days=1",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = read_body(response).await;
        assert!(body.contains("class=\"banner\""));
        assert!(body.contains("missing items list"));
        assert_eq!(app.last_record_count().await, None);
    }

    #[tokio::test]
    async fn test_favicon_is_not_found() {
        let (app, _temp_dir) = create_test_app(MockPageFetcher::returning(0));

        let response = build_router(app)
            .oneshot(Request::get("/favicon.ico").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_export_failure_returns_server_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let app = SearchApp::build(
            ConfigStore::at(temp_dir.path().join("config.json")),
            Arc::new(MockPageFetcher::returning(0)),
            CsvExportSink::new(temp_dir.path().join("missing-dir").join("output.csv")),
        )
        .unwrap();

        let response = build_router(Arc::new(app))
            .oneshot(Request::get("/export").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(read_body(response).await.starts_with("Error saving:"));
    }
}
