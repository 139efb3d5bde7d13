use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;

use wallet_radar::api::router::create_router;
use wallet_radar::config::AppConfig;
use wallet_radar::source::{DataSource, MockDataSource};
use wallet_radar::AppState;

/// Mock-backed config with no simulated network delay.
#[allow(dead_code)]
pub fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        simulated_latency_ms: 0,
        ..AppConfig::default()
    }
}

#[allow(dead_code)]
pub fn build_app_with_source(source: Arc<dyn DataSource>) -> Router {
    let state = AppState {
        config: test_config(),
        source,
        metrics_handle: wallet_radar::metrics::init_metrics(),
    };
    create_router(state)
}

#[allow(dead_code)]
pub fn build_test_app() -> Router {
    build_app_with_source(Arc::new(MockDataSource::new(&test_config())))
}

#[allow(dead_code)]
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// GET `uri` and parse the body as JSON.
#[allow(dead_code)]
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = get(app, uri).await;
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap();
    (status, json)
}
