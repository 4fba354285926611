//! Axum application setup.

use std::net::SocketAddr;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::handlers;
use super::state::AppState;
use crate::web::static_handler;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState, max_body_bytes: usize) -> Router {
    // The UI may be served from anywhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/upload", post(handlers::upload_csv))
        .route("/dataset/:id", get(handlers::get_dataset))
        .route("/dataset/:id/table", get(handlers::get_table))
        .route(
            "/dataset/:id/column/:col/stats",
            get(handlers::get_column_stats),
        )
        .route(
            "/dataset/:id/column/:col/hist",
            get(handlers::get_column_histogram),
        )
        .fallback(api_not_found);

    Router::new()
        .nest("/api", api_routes)
        .fallback(static_handler)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn api_not_found() -> ApiError {
    ApiError::NotFound("no such API route".to_string())
}

/// Start the web server and run until Ctrl+C.
pub async fn run_server(
    state: AppState,
    addr: SocketAddr,
    max_body_bytes: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state, max_body_bytes);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, max_body_bytes, "tablescope server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tablescope::Tablescope;
    use tower::ServiceExt;

    const BOUNDARY: &str = "tablescope-test-boundary";

    fn router() -> Router {
        create_router(AppState::new(Tablescope::new()), 1024 * 1024)
    }

    fn upload_request(field: &str, csv: &str) -> Request<Body> {
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"data.csv\"\r\n\
             Content-Type: text/csv\r\n\r\n{csv}\r\n--{b}--\r\n",
            b = BOUNDARY,
            field = field,
            csv = csv
        );
        Request::builder()
            .method("POST")
            .uri("/api/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_upload_and_analyze() {
        let app = router();

        let (status, body) = send(&app, upload_request("file", "a,b\n1,x\n2,y\n,z\n")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dataset_id"], "1");
        assert_eq!(
            body["schema"],
            json!([{"name": "a", "type": "int64"}, {"name": "b", "type": "string"}])
        );

        let (status, rows) = send(&app, get_request("/api/dataset/1/table")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            rows,
            json!([{"a": 1, "b": "x"}, {"a": 2, "b": "y"}, {"a": null, "b": "z"}])
        );

        let (status, stats) = send(&app, get_request("/api/dataset/1/column/a/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["min"], 1);
        assert_eq!(stats["max"], 2);
        assert_eq!(stats["mean"], 1.5);
        assert_eq!(stats["median"], 1.5);
        assert_eq!(stats["missing_count"], 1);

        let (_, stats) = send(&app, get_request("/api/dataset/1/column/b/stats")).await;
        assert_eq!(stats["mode"], "x");
        assert!(stats.get("mean").is_none());

        let (status, hist) = send(&app, get_request("/api/dataset/1/column/a/hist?bins=2")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(hist["bins"], json!([1.0, 1.5, 2.0]));
        assert_eq!(hist["counts"], json!([1, 1]));

        let (_, info) = send(&app, get_request("/api/dataset/1")).await;
        assert_eq!(info["file_name"], "data.csv");
        assert_eq!(info["row_count"], 3);
    }

    #[tokio::test]
    async fn test_default_bin_count() {
        let app = router();
        send(&app, upload_request("file", "v\n1\n2\n3\n")).await;

        let (status, hist) = send(&app, get_request("/api/dataset/1/column/v/hist")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(hist["counts"].as_array().unwrap().len(), 30);
        assert_eq!(hist["bins"].as_array().unwrap().len(), 31);
    }

    #[tokio::test]
    async fn test_all_missing_column() {
        let app = router();
        let (_, body) = send(&app, upload_request("file", "a,b\n,1\n,2\n")).await;
        assert_eq!(body["schema"][0]["type"], "float64");

        let (status, stats) = send(&app, get_request("/api/dataset/1/column/a/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(stats["mean"].is_null());
        assert!(stats["min"].is_null());
        assert_eq!(stats["missing_count"], 2);

        let (status, hist) = send(&app, get_request("/api/dataset/1/column/a/hist")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(hist, json!({"bins": [], "counts": []}));
    }

    #[tokio::test]
    async fn test_unknown_dataset_is_not_found_everywhere() {
        let app = router();
        for uri in [
            "/api/dataset/7",
            "/api/dataset/7/table",
            "/api/dataset/7/column/a/stats",
            "/api/dataset/7/column/a/hist",
        ] {
            let (status, body) = send(&app, get_request(uri)).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["code"], "not_found");
            assert!(body["error"].is_string());
        }
    }

    #[tokio::test]
    async fn test_column_errors() {
        let app = router();
        send(&app, upload_request("file", "n,t\n1,x\n")).await;

        let (status, body) = send(&app, get_request("/api/dataset/1/column/zz/stats")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "invalid_column");

        let (status, body) = send(&app, get_request("/api/dataset/1/column/t/hist")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "not_numeric");

        let (status, body) = send(&app, get_request("/api/dataset/1/column/n/hist?bins=0")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_argument");

        let (status, body) = send(&app, get_request("/api/dataset/1/column/n/hist?bins=abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "bad_request");
    }

    #[tokio::test]
    async fn test_failed_upload_registers_nothing() {
        let app = router();

        let (status, body) = send(&app, upload_request("file", "a,b\n")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "ingest_error");

        let (status, body) = send(&app, upload_request("other", "a\n1\n")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "bad_request");

        let (_, health) = send(&app, get_request("/api/health")).await;
        assert_eq!(health["datasets"], 0);

        let (_, body) = send(&app, upload_request("file", "a\n1\n")).await;
        assert_eq!(body["dataset_id"], "1");
    }

    #[tokio::test]
    async fn test_upload_requires_multipart() {
        let app = router();
        let request = Request::builder()
            .method("POST")
            .uri("/api/upload")
            .header(header::CONTENT_TYPE, "text/csv")
            .body(Body::from("a\n1\n"))
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "bad_request");
    }

    #[tokio::test]
    async fn test_unknown_api_route_is_json() {
        let (status, body) = send(&router(), get_request("/api/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }

    #[tokio::test]
    async fn test_serves_index() {
        let response = router().oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE].to_str().unwrap(),
            "text/html"
        );
    }
}
