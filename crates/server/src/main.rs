use std::net::SocketAddr;
use std::path::PathBuf;

use app_api::AppContext;
use http_api::HttpState;
use kpi_app::{AppPaths, AppState, ensure_app_data_dir};
use tokio::net::TcpListener;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 4600;

fn resolve_data_dir() -> PathBuf {
    std::env::var_os("KPI_TRACKER_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"))
}

fn resolve_port() -> Result<u16, Box<dyn std::error::Error>> {
    match std::env::var("KPI_TRACKER_PORT") {
        Ok(value) => Ok(value
            .parse()
            .map_err(|_| format!("invalid KPI_TRACKER_PORT: {value}"))?),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let data_dir = resolve_data_dir();
    let port = resolve_port()?;

    let paths = AppPaths::new(data_dir);
    ensure_app_data_dir(&paths)?;
    info!(data_dir = %paths.app_data_dir.display(), "using data dir");

    let app_state = AppState::new(paths.db_path);
    app_state.initialize()?;

    let context = AppContext {
        app_state,
        app_data_dir: paths.app_data_dir,
    };
    let app = http_api::router(HttpState::new(context));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "kpi tracker listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to install ctrl-c handler");
    }
}
