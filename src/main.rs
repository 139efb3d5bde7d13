use wallet_radar::api::router::create_router;
use wallet_radar::config::AppConfig;
use wallet_radar::{init_tracing, metrics, source, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = config.bind_addr();

    let source = source::from_config(&config)?;
    tracing::info!(
        data_source = %source.kind(),
        chain_id = config.chain_id,
        "Data source ready"
    );

    let state = AppState {
        source,
        metrics_handle: metrics::init_metrics(),
        config,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
