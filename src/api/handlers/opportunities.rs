use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::aggregate::data_points;
use crate::api::query::{parse_decimal, ListParams, MirrorParams};
use crate::api::types::{OpportunitiesMetadata, OpportunitiesResponse};
use crate::errors::AppError;
use crate::mirror::{self, MirrorPlan, MAX_MIRROR_AMOUNT};
use crate::models::Timeframe;
use crate::AppState;

pub const DEFAULT_LIMIT: usize = 10;

/// `GET /api/opportunities/top?limit=N&timeframe=24h`
pub async fn top(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<OpportunitiesResponse>, AppError> {
    let limit = params.limit(DEFAULT_LIMIT);
    let timeframe = params.timeframe();

    let (wallets, insights) = tokio::try_join!(
        state.source.top_wallets(timeframe),
        state.source.market_insights(),
    )
    .map_err(|e| AppError::handler("Failed to fetch top opportunities", e))?;

    let top_wallets: Vec<_> = wallets.into_iter().take(limit).collect();
    let mirror_opportunities = top_wallets.iter().map(mirror::opportunity).collect();

    Ok(Json(OpportunitiesResponse {
        metadata: OpportunitiesMetadata {
            timeframe,
            data_points: data_points(&top_wallets),
            last_updated: Utc::now(),
            network: format!("Sei EVM ({})", state.config.chain_id),
        },
        top_wallets,
        mirror_opportunities,
        market_insights: insights,
    }))
}

/// `GET /api/opportunities/{address}/mirror?amount=1000&slippage=0.5`
///
/// Amount is clamped to `0..=MAX_MIRROR_AMOUNT` and slippage to the 0.1..=5
/// percent range the swap form accepts.
pub async fn mirror_plan(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(params): Query<MirrorParams>,
) -> Result<Json<MirrorPlan>, AppError> {
    let amount = parse_decimal(
        params.amount.as_deref(),
        Decimal::from(1_000),
        Decimal::ZERO,
        MAX_MIRROR_AMOUNT,
    );
    let slippage = parse_decimal(
        params.slippage.as_deref(),
        Decimal::new(5, 1),
        Decimal::new(1, 1),
        Decimal::from(5),
    );

    let wallets = state
        .source
        .top_wallets(Timeframe::default())
        .await
        .map_err(|e| AppError::handler("Failed to build mirror plan", e))?;

    let wallet = wallets
        .iter()
        .find(|w| w.address.eq_ignore_ascii_case(&address))
        .ok_or_else(|| AppError::NotFound(format!("Wallet {address} is not on the leaderboard")))?;

    let plan = mirror::plan_mirror(wallet, amount, slippage).ok_or_else(|| {
        AppError::handler(
            "Failed to build mirror plan",
            anyhow::anyhow!("cost breakdown overflowed for amount {amount}"),
        )
    })?;

    tracing::info!(address = %wallet.address, %amount, %slippage, "Built mirror plan");
    Ok(Json(plan))
}
