// Sprintdeck - Sprint Report Export Tool
// Copyright (c) 2025 Sprintdeck Contributors
// Licensed under the MIT License

use clap::Parser;
use sprintdeck::cli::{Cli, Commands};
use sprintdeck::config::LoggingConfig;
use sprintdeck::logging::init_logging;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // .env is optional; absence is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // CLI runs log to the console only; file logging is a config concern
    let level = cli.log_level.as_deref().unwrap_or("info");
    let _logging = match init_logging(level, &LoggingConfig::default()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            std::process::exit(5);
        }
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Sprintdeck starting");

    let shutdown_rx = spawn_signal_listener();

    let exit_code = match run(&cli, shutdown_rx).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            5
        }
    };
    std::process::exit(exit_code);
}

/// Flip a watch channel to `true` on SIGINT/SIGTERM so in-flight exports can
/// wind down between retry attempts
fn spawn_signal_listener() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);

    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm =
                signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
            tokio::select! {
                _ = tokio::signal::ctrl_c() => tracing::info!("SIGINT received, shutting down"),
                _ = sigterm.recv() => tracing::info!("SIGTERM received, shutting down"),
            }
        }
        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                return;
            }
            tracing::info!("SIGINT received, shutting down");
        }
        let _ = tx.send(true);
    });

    rx
}

async fn run(cli: &Cli, shutdown: watch::Receiver<bool>) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => args.execute(&cli.config, shutdown).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Status(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
