use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;

use crate::aggregate::{event_summary, paginate};
use crate::api::query::ListParams;
use crate::api::types::{Pagination, WalletEventsResponse};
use crate::errors::AppError;
use crate::mock;
use crate::models::WalletAnalysis;
use crate::AppState;

pub const DEFAULT_EVENTS_LIMIT: usize = 50;

/// `GET /api/wallet/{address}/analysis`
pub async fn analysis(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<WalletAnalysis>, AppError> {
    let analysis = state
        .source
        .wallet_analysis(&address)
        .await
        .map_err(|e| AppError::handler("Failed to analyze wallet", e))?;
    Ok(Json(analysis))
}

/// `GET /api/wallet/{address}/events?limit=N&offset=M`
pub async fn events(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<WalletEventsResponse>, AppError> {
    let limit = params.limit(DEFAULT_EVENTS_LIMIT);
    let offset = params.offset();

    let events = state
        .source
        .wallet_events(&address)
        .await
        .map_err(|e| AppError::handler("Failed to fetch wallet events", e))?;

    let page = paginate(&events, limit, offset);

    Ok(Json(WalletEventsResponse {
        pagination: Pagination {
            total: events.len(),
            limit,
            offset,
            has_more: page.has_more,
        },
        unusual_activities: mock::unusual_activities(&events),
        summary: event_summary(&events, Utc::now()),
        events: page.items.to_vec(),
        address,
    }))
}
