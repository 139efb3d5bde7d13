use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;

use crate::aggregate::{average_latency, paginate};
use crate::api::query::ListParams;
use crate::api::types::{AlertsMetadata, RecentAlertsResponse};
use crate::errors::AppError;
use crate::export::{self, ExportFormat};
use crate::AppState;

pub const DEFAULT_LIMIT: usize = 20;

/// Blocks the detector scans per cycle; reported, not computed.
pub const MONITORED_BLOCKS: u64 = 1_000;

/// `GET /api/alerts/recent?limit=N`
pub async fn recent(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<RecentAlertsResponse>, AppError> {
    let limit = params.limit(DEFAULT_LIMIT);
    let alerts = state
        .source
        .recent_alerts()
        .await
        .map_err(|e| AppError::handler("Failed to fetch recent alerts", e))?;

    let page = paginate(&alerts, limit, 0);
    metrics::counter!("alerts_served_total").increment(page.items.len() as u64);
    tracing::debug!(limit, returned = page.items.len(), total = alerts.len(), "Serving recent alerts");

    Ok(Json(RecentAlertsResponse {
        alerts: page.items.to_vec(),
        metadata: AlertsMetadata {
            total: alerts.len(),
            avg_latency: average_latency(&alerts).round(),
            last_updated: Utc::now(),
            monitored_blocks: MONITORED_BLOCKS,
        },
    }))
}

/// `GET /api/alerts/export?format=csv|json`
pub async fn export(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, AppError> {
    let format = ExportFormat::from_query(params.format.as_deref());
    let alerts = state
        .source
        .recent_alerts()
        .await
        .map_err(|e| AppError::handler("Failed to export alerts", e))?;

    let now = Utc::now();
    let body = match format {
        ExportFormat::Csv => export::to_csv(&alerts),
        ExportFormat::Json => export::to_json(&alerts, now)
            .map_err(|e| AppError::handler("Failed to export alerts", e))?,
    };

    tracing::info!(?format, count = alerts.len(), "Exported alerts");

    let disposition = format!("attachment; filename=\"{}\"", format.file_name(now));
    Ok((
        [
            (CONTENT_TYPE, format.content_type().to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
