use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::handlers;
use super::middleware::{panic_response, track_requests};

pub fn create_router(state: AppState) -> Router {
    let ops = Router::new()
        .route("/health", get(handlers::ops::health_check))
        .route("/metrics", get(handlers::ops::render_metrics));

    let api = Router::new()
        // Alerts
        .route("/api/alerts/recent", get(handlers::alerts::recent))
        .route("/api/alerts/export", get(handlers::alerts::export))
        // Network
        .route("/api/network/status", get(handlers::network::status))
        // Opportunities
        .route("/api/opportunities/top", get(handlers::opportunities::top))
        .route("/api/opportunities/:address/mirror", get(handlers::opportunities::mirror_plan))
        // Wallets
        .route("/api/wallet/:address/analysis", get(handlers::wallet::analysis))
        .route("/api/wallet/:address/events", get(handlers::wallet::events))
        .route_layer(middleware::from_fn(track_requests));

    // The dashboard is served from another origin during development.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    ops.merge(api)
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
