//! Standalone web server binary
//!
//! Usage: cargo run -p blackjack_web --bin blackjack-web-server -- --port 8080

use blackjack_web::settings::{self, SettingsOverrides};
use blackjack_web::{ServerConfig, WebServer};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "blackjack-web-server", about = "Blackjack HTTP API server")]
struct Args {
    /// TOML settings file (overrides BLACKJACK_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    host: Option<String>,
    #[arg(long, short)]
    port: Option<u16>,
    /// Minutes of inactivity before a session is dropped
    #[arg(long)]
    session_timeout: Option<u64>,
    /// Seed for deterministic shuffles
    #[arg(long)]
    seed: Option<u64>,
    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    blackjack_web::init_logging(args.json_logs)?;

    let overrides = SettingsOverrides {
        config: args.config,
        host: args.host,
        port: args.port,
        session_timeout_minutes: args.session_timeout,
        seed: args.seed,
    };
    let resolved = settings::load(&overrides)?;
    tracing::info!(
        host = %resolved.settings.host,
        port = resolved.settings.port,
        session_timeout_minutes = resolved.settings.session_timeout_minutes,
        seed = ?resolved.settings.seed,
        sources = ?resolved.sources,
        "resolved settings"
    );

    let server = WebServer::new(ServerConfig::from_settings(&resolved.settings));
    let handle = server.start().await?;
    println!("Server running at http://{}  (Ctrl+C to stop)", handle.address());

    tokio::signal::ctrl_c().await?;

    tracing::info!("shutting down");
    handle.shutdown().await?;
    Ok(())
}
