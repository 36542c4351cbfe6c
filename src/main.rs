use std::path::PathBuf;

use accounts::config::Configuration;
use accounts::{app, initialize_state, telemetry};
use clap::Parser;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    #[arg(long, short, default_value = "config.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    telemetry::setup_tracing();

    let config = Configuration::default().path(args.config).read();

    let metrics = match telemetry::setup_metrics_recorder() {
        Ok(handle) => Some(handle),
        Err(err) => {
            tracing::warn!(error = %err, "metrics recorder not installed");
            None
        },
    };

    // A storage failure renders the entire API unusable.
    let state = match initialize_state(config, metrics).await {
        Ok(state) => state,
        Err(err) => {
            tracing::error!(error = %err, "cannot initialize storage");
            std::process::exit(1);
        },
    };

    let address = state.config.address.clone();
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, %address, "cannot bind listener");
            std::process::exit(1);
        },
    };

    tracing::info!(%address, "server is running");

    if let Err(err) = axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %err, "server stopped");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
