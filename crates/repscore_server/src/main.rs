use anyhow::Result;
use clap::Parser;
use repscore_error::{HttpError, RepscoreError};
use repscore_models::ResponsesClient;
use repscore_server::{ApiState, EVALUATE_PATH, RepscoreConfig, create_router, init_tracing};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Repscore practice call scoring endpoint", long_about = None)]
struct Args {
    /// Configuration file (default: ./repscore.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind, overriding the configuration
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overriding the configuration
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the effective configuration (without secrets) and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let config = RepscoreConfig::load(args.config.as_deref())?.with_bind(args.host, args.port);

    if args.check {
        println!("{}", serde_json::to_string_pretty(&config)?);
        println!("api_key configured: {}", config.provider().has_api_key());
        return Ok(());
    }

    init_tracing(config.server())?;
    config.warn_if_incomplete();

    let config = Arc::new(config);
    let client = Arc::new(ResponsesClient::new(config.provider().clone()));
    let app = create_router(ApiState::new(client, config.clone()));

    let addr = config.server().bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RepscoreError::from(HttpError::bind(&addr, e)))?;
    info!(
        addr = %addr,
        path = EVALUATE_PATH,
        model = %config.provider().model(),
        "Starting Repscore server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| RepscoreError::from(HttpError::serve(e)))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
