//! Uptime monitor entry point

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use uptime::cli::Cli;
use uptime::shutdown::ShutdownController;
use uptime::{config, logging, Monitor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init().context("failed to initialize logging")?;

    let endpoints = match config::load_endpoints(&cli.config) {
        Ok(endpoints) => endpoints,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let shutdown = ShutdownController::default();
    let mut monitor = Monitor::new(endpoints, cli.settings(), shutdown.clone())?;

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.request_shutdown();
    });

    monitor.run().await;

    info!("Monitoring stopped by user.");
    Ok(())
}

/// シャットダウンシグナルを待機
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
