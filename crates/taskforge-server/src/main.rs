//! Taskforge generation server binary.

use std::net::Ipv4Addr;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Serve the task-generation API.
#[derive(Debug, Parser)]
#[command(name = "taskforge-server", version)]
struct Args {
    /// Port to listen on.
    #[arg(long, default_value_t = 3001)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let listener =
        tokio::net::TcpListener::bind((Ipv4Addr::UNSPECIFIED, args.port)).await?;
    info!(port = args.port, "taskforge server listening");

    axum::serve(listener, taskforge_server::router()).await?;
    Ok(())
}
