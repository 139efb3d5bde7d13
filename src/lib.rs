pub mod aggregate;
pub mod api;
pub mod client;
pub mod config;
pub mod errors;
pub mod explorer;
pub mod export;
pub mod metrics;
pub mod mirror;
pub mod mock;
pub mod models;
pub mod source;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::source::DataSource;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub source: Arc<dyn DataSource>,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}

/// Install the global subscriber. `RUST_LOG` filters (default `info`);
/// `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
