use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use departure_board::board::Aggregator;
use departure_board::config::{AppConfig, ConfigError};
use departure_board::refresh::{BoardState, RefreshScheduler};
use departure_board::sl::{MockSlClient, SlClient, SlConfig, SlError, SlSource};
use departure_board::web::{AppState, create_router};

const DEFAULT_LOG_FILTER: &str = "departure_board=info,tower_http=info";

/// Anything that stops the server from starting.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to set up departure source: {0}")]
    Source(#[from] SlError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::from_env()?;

    let source = match &config.mock_dir {
        Some(dir) => {
            let mock = MockSlClient::new(dir)?;
            info!(dir = %dir.display(), sites = ?mock.available_sites(), "using canned SL responses");
            SlSource::Mock(mock)
        }
        None => {
            let mut sl_config = SlConfig::new(&config.api_key).with_timeout(config.sl_timeout_secs);
            if let Some(url) = &config.sl_base_url {
                sl_config = sl_config.with_base_url(url);
            }
            SlSource::Live(SlClient::new(sl_config)?)
        }
    };

    for station in &config.stations {
        info!(
            station = %station.title,
            site_id = %station.query.site_id,
            time_window = station.query.time_window_mins,
            "monitoring station"
        );
    }

    let aggregator = Aggregator::new(source, config.stations.clone());
    let board = BoardState::new();
    let scheduler = RefreshScheduler::new(aggregator, board.clone(), config.refresh_interval);

    // Fill the board before the first request can arrive
    scheduler.prime().await;
    scheduler.spawn();

    let state = AppState::new(board, config.page_title.clone());
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "departure board listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
