//! Demo server for the JSON response helpers.
//!
//! # Routes
//! - `GET /health` answers through `ok`
//! - `POST /echo` echoes a JSON body, or `bad_request` when it does not parse
//! - `POST /status/{code}` answers through `json` with the given status
//! - `GET /fail` answers through `internal_server_error`
//!
//! Append `?pretty` to any route for indented output.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use response_helper::config::{load_config, ServerConfig};
use response_helper::observability::init_logging;
use response_helper::HttpServer;

#[derive(Parser)]
#[command(name = "response-helper")]
#[command(about = "Demo server for the JSON response helpers", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.http.request_timeout_secs,
        log_format = ?config.observability.log_format,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
