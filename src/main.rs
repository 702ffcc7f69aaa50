//! Wellness Monitor — Binary Entrypoint
//! Boots the Axum HTTP server, wiring config, shared state, and metrics.

use shuttle_axum::ShuttleAxum;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use wellness_monitor::api::{self, AppState};
use wellness_monitor::config::AppConfig;
use wellness_monitor::metrics::Metrics;

/// Compact logs; `RUST_LOG` wins over the built-in filter.
/// The runtime may already have installed a subscriber, so this is best effort.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("wellness_monitor=info,checkin=info,config=info,store=info,warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = AppConfig::load()?;
    let state = AppState::from_config(&cfg)?;
    info!(
        target: "config",
        entries = state.store.len(),
        recommendation_window = cfg.windows.recommendation,
        "wellness monitor ready"
    );

    let metrics = Metrics::init(cfg.windows.recommendation)?;
    let router = api::router(state).merge(metrics.router());

    Ok(router.into())
}
