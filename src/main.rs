use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use economic_data_api::auth::TokenStore;
use economic_data_api::config;
use economic_data_api::observability::{logging, metrics};
use economic_data_api::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "economic-data-api")]
#[command(about = "Authenticated HTTP API for FRED economic indicators", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = config::load_or_default(&cli.config)?;
    logging::init_tracing(&config.observability.log_level);

    tracing::info!("economic-data-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.fred.base_url,
        cache_ttl_secs = config.cache.ttl_secs,
        auth_enabled = config.auth.enabled,
        "Configuration loaded"
    );

    if config.fred.api_key.is_empty() {
        tracing::warn!("No FRED API key configured; upstream calls will be rejected");
    }

    let tokens = if config.auth.enabled {
        TokenStore::load_from_file(&config.auth.token_file)?
    } else {
        TokenStore::new()
    };

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.trigger();
        }
    });

    let server = HttpServer::new(config, tokens)?;
    server.run(listener, rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
