use anyhow::Result;
use clap::Parser;
use orders_service::{logging, Config, OrdersServiceModule};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Orders service HTTP server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// YAML configuration file; `ORDERS__*` environment variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    if cli.print_config {
        println!("{config:#?}");
        return Ok(());
    }

    logging::init(&config.logging)?;

    let module = Arc::new(OrdersServiceModule::init(config).await?);

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for shutdown signal");
        }
        tracing::info!("shutdown requested");
        shutdown.cancel();
    });

    module.serve(cancel).await
}
