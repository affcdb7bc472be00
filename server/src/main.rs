mod api;
mod protocol;
mod scores;
mod server_config;
mod session_runner;
mod web_server;
mod ws_handler;

use std::path::PathBuf;

use clap::Parser;
use common::config::{FileContentConfigProvider, to_yaml};
use common::games::snake::SnakeSessionSettings;
use common::logger;
use tracing::{info, warn};

use scores::{ScoreRecorder, ScoreStore};
use server_config::load_server_config;
use web_server::{AppState, build_router, run_web_server};

#[derive(Parser)]
#[command(name = "snake_arena_server")]
struct Args {
    /// YAML config file; defaults apply when it does not exist.
    #[arg(long, default_value = "snake_arena.yaml")]
    config: PathBuf,

    /// Overrides `listen_addr` from the config file.
    #[arg(long)]
    listen: Option<String>,

    /// Print the effective config (without environment overrides) and exit.
    #[arg(long)]
    dump_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.dump_config {
        let config = load_server_config(FileContentConfigProvider::new(&args.config), |_| None)?;
        print!("{}", to_yaml(&config)?);
        return Ok(());
    }

    let mut config = load_server_config(FileContentConfigProvider::new(&args.config), |key| {
        std::env::var(key).ok()
    })?;
    if let Some(listen) = args.listen {
        config.listen_addr = listen;
    }

    logger::init_logger(&config.log_level);

    let store = ScoreStore::connect(&config.database.url, config.database.max_connections).await?;
    info!("Score store backend: {}", store.backend_name());
    if let Err(e) = store.ensure_schema().await {
        warn!("player_score not ready yet, will retry on first save: {}", e);
    }

    let state = AppState::new(ScoreRecorder::new(store.clone()), SnakeSessionSettings::default());
    let router = build_router(state, &config.static_files_path);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received");
    };

    run_web_server(listener, router, shutdown_signal).await?;

    store.close().await;
    info!("Server shut down gracefully");

    Ok(())
}
