use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;

use crate::api::types::NetworkStatusError;
use crate::AppState;

/// `GET /api/network/status`
///
/// Failures keep the dashboard's error shape (`chainId`, `status: "error"`)
/// rather than the generic error body.
pub async fn status(State(state): State<AppState>) -> Response {
    match state.source.network_status().await {
        Ok(status) => Json(status).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch network status");
            metrics::counter!("api_errors_total").increment(1);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(NetworkStatusError {
                    chain_id: state.config.chain_id,
                    status: "error".into(),
                    error: "Failed to fetch network status".into(),
                    timestamp: Utc::now(),
                }),
            )
                .into_response()
        }
    }
}
