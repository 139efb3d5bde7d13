use std::any::Any;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Per-route request metrics.
///
/// Counts every matched request by route template and status, and records
/// handler latency. Installed as a route layer so `MatchedPath` is present.
pub async fn track_requests(req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let started = Instant::now();
    let resp = next.run(req).await;
    let elapsed = started.elapsed();

    metrics::counter!(
        "api_requests_total",
        "route" => route.clone(),
        "status" => resp.status().as_u16().to_string()
    )
    .increment(1);
    metrics::histogram!("handler_latency_seconds", "route" => route.clone())
        .record(elapsed.as_secs_f64());

    tracing::debug!(
        route = %route,
        status = resp.status().as_u16(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Request handled"
    );

    resp
}

/// Turn a handler panic into the regular 500 error body.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");
    metrics::counter!("api_errors_total").increment(1);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Internal server error",
            "status": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        })),
    )
        .into_response()
}
