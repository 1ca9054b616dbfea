//! flowboard - Personal task board server
//!
//! Serves the task API over HTTP, backed by two flat files in a local
//! data directory.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use flowboard::api;
use flowboard::service::TaskService;
use flowboard::storage::Storage;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "flowboard", version, about = "Personal task board with WIP limits")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0", env = "FLOWBOARD_HOST")]
    host: IpAddr,

    /// Port to listen on
    #[arg(long, default_value_t = 5001, env = "FLOWBOARD_PORT")]
    port: u16,

    /// Directory holding tasks.jsonl and config.json
    #[arg(long, default_value = "data", env = "FLOWBOARD_DATA_DIR")]
    data_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Tracing is opt-in via RUST_LOG.
    // Keep startup robust in CI/robot envs: ignore invalid/huge filters.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let args = Args::parse();

    let storage = Storage::new(&args.data_dir);
    storage
        .init()
        .with_context(|| format!("initializing data directory {}", args.data_dir.display()))?;

    let app = api::router(TaskService::new(storage));
    let addr = SocketAddr::new(args.host, args.port);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, data_dir = %args.data_dir.display(), "flowboard listening");

    axum::serve(listener, app).await?;

    Ok(())
}
