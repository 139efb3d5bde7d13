//! Terminal watcher: runs the dashboard controller against a radar API and
//! logs every view change until Ctrl-C. Wallets listed in `RADAR_WATCHLIST`
//! are followed and summarized every `WALLET_POLL_SECS`.

use std::time::Duration;

use wallet_radar::client::controller::DashboardController;
use wallet_radar::client::RadarClient;
use wallet_radar::config::ClientConfig;
use wallet_radar::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ClientConfig::from_env();
    let client = RadarClient::new(&config)?;
    let mut controller = DashboardController::start(client, &config);
    tracing::info!(
        tasks = ?controller.task_names(),
        followed = controller.watchlist().len(),
        "Watching {}",
        config.api_url
    );

    let wallet_period = Duration::from_secs(config.wallet_poll_secs.max(1));
    let mut wallet_report = tokio::time::interval(wallet_period);

    loop {
        tokio::select! {
            Ok(()) = controller.alerts.changed() => {
                let state = controller.alerts.borrow_and_update().clone();
                match state.data {
                    Some(resp) if state.connected => tracing::info!(
                        shown = resp.alerts.len(),
                        total = resp.metadata.total,
                        avg_latency_ms = resp.metadata.avg_latency,
                        "Alerts updated"
                    ),
                    _ => tracing::warn!(error = ?state.last_error, "Alerts disconnected"),
                }
            }
            Ok(()) = controller.opportunities.changed() => {
                let state = controller.opportunities.borrow_and_update().clone();
                let top = state
                    .data
                    .as_ref()
                    .and_then(|opps| opps.first())
                    .map(|o| format!("{} ({:.1}%)", o.wallet.label, o.wallet.pnl.percentage));
                tracing::info!(
                    connected = state.connected,
                    fallback = state.is_fallback,
                    top = ?top,
                    "Opportunities updated"
                );
            }
            Ok(()) = controller.network.changed() => {
                let state = controller.network.borrow_and_update().clone();
                match state.data {
                    Some(status) if state.connected => tracing::info!(
                        block = status.latest_block,
                        response_time = %status.response_time,
                        gas = %status.metrics.gas_price,
                        "Network status"
                    ),
                    _ => tracing::warn!(error = ?state.last_error, "Network disconnected"),
                }
            }
            Ok(()) = controller.feed.changed() => {
                let feed = controller.feed.borrow_and_update().clone();
                if let Some(item) = feed.latest() {
                    tracing::info!(
                        severity = %item.severity,
                        alerts_24h = feed.alerts_24h(),
                        url = %item.explorer_url,
                        "{}",
                        item.message
                    );
                }
            }
            _ = wallet_report.tick(), if !controller.watchlist().is_empty() => {
                for address in controller.watchlist().iter() {
                    let Some(view) = controller.wallet(address) else { continue };
                    let analysis = view.analysis.borrow().clone();
                    let events = view.events.borrow().clone();
                    match (analysis.data, events.data) {
                        (Some(a), Some(e)) => tracing::info!(
                            address,
                            behavior_score = %a.behavior_score,
                            risk = %a.risk_assessment.overall,
                            events = e.pagination.total,
                            unusual = e.unusual_activities.len(),
                            "Followed wallet"
                        ),
                        _ => tracing::warn!(
                            address,
                            error = ?analysis.last_error.or(events.last_error),
                            "Followed wallet not loaded"
                        ),
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    drop(controller);
    Ok(())
}
