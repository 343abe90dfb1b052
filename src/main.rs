//! Process bootstrap: CLI, config, logging, and the two halves of the
//! pipeline — the ingestion server on its own runtime thread, the dashboard
//! on the main thread.

use anyhow::Context;
use clap::{Parser, Subcommand};
use dumpdeck::{rendezvous, server, Config, Dashboard, EventStore};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

#[derive(Parser)]
#[command(name = "dumpdeck", version, about = "A live terminal dashboard for debug dumps")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the ingestion server and the dashboard.
    Listen {
        /// Path to the config file (default: the per-user config directory).
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Listen { config } => listen(config),
    }
}

fn listen(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config_path = match config_path {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = Config::load_or_create(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    // Logs go to a file next to the config; stdout belongs to the dashboard.
    let _log_guard = init_tracing(&config_path);
    tracing::info!(config = %config_path.display(), addr = %config.display_addr(), "starting");

    let store = Arc::new(EventStore::new());
    let (updates_tx, updates_rx) = rendezvous();

    // Bind before touching the terminal so "port in use" is a clean error.
    let listener = server::bind(&config)?;

    let server_store = store.clone();
    thread::Builder::new()
        .name("dumpdeck-server".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    tracing::error!(error = %e, "failed to start server runtime");
                    return;
                }
            };
            if let Err(e) = runtime.block_on(server::serve(listener, server_store, updates_tx)) {
                tracing::error!(error = %e, "ingestion server stopped");
            }
        })
        .context("spawning server thread")?;

    let status = format!("Listening on {}", config.display_addr());
    Dashboard::new(store, updates_rx, status)?.run()?;

    tracing::info!("dashboard closed, exiting");
    Ok(())
}

/// File-based tracing; returns the guard that flushes buffered lines.
fn init_tracing(config_path: &std::path::Path) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let dir = config_path.parent()?;
    let appender = tracing_appender::rolling::never(dir, "dumpdeck.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}
