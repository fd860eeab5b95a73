//!
//! Serve the Elastic dashboard's web build.
//!

use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::info;

/// Static file server for the Elastic dashboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on (all interfaces)
    #[arg(short, long, default_value_t = elastic_web::DEFAULT_PORT)]
    port: u16,

    /// Directory to serve
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    let args = Args::parse();

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind {addr}"))?;
    info!(port = args.port, dir = %args.dir.display(), "serving dashboard");

    axum::serve(listener, elastic_web::router(&args.dir))
        .with_graceful_shutdown(elastic_web::shutdown_on(tokio::signal::ctrl_c()))
        .await?;

    Ok(())
}
