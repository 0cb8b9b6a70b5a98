//! Binary entry point: arguments, configuration, logging, dispatch

use super::cli::args::{Args, Command};
use super::cli::config::{FileConfig, Settings};
use super::commands;
use super::error::AppResult;
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use clap::Parser;
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

/// Run the application and return the process exit code
pub async fn startup() -> i32 {
    let args = Args::parse();

    let file_config = match FileConfig::load(args.config_file.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let settings = match Settings::resolve(&args, file_config) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let use_color = settings
        .color
        .unwrap_or_else(|| std::io::stdout().is_terminal());
    colored::control::set_override(use_color);

    let log_file = settings
        .log_file
        .as_ref()
        .map(|path| path.to_string_lossy().into_owned());
    if let Err(e) = init_logging(
        Some(settings.log_level.as_str()),
        settings.log_format,
        log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Error: failed to initialize logging: {}", e);
        return 1;
    }

    log::debug!("Resolved settings: {:?}", settings);

    let command = args.command.clone().unwrap_or(Command::Pending);
    match run(command, &settings).await {
        Ok(()) => 0,
        Err(e) => {
            log_error_with_context(&e, &format!("Using store {}", settings.store.display()));
            1
        }
    }
}

async fn run(command: Command, settings: &Settings) -> AppResult<()> {
    let queue = commands::open_queue(settings).await?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Send { messages } => commands::send(&queue, &messages, &mut out).await,
        Command::Pending => commands::pending(&queue, &mut out).await.map(|_| ()),
        Command::Drain => commands::drain(&queue, &mut out).await.map(|_| ()),
        Command::Watch { delay_ms } => {
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            let shutdown = async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    log::warn!("Cannot listen for Ctrl-C: {}", e);
                    std::future::pending::<()>().await;
                }
            };
            let summary = commands::watch(
                Arc::new(queue),
                input,
                &mut out,
                Duration::from_millis(delay_ms),
                shutdown,
            )
            .await?;
            log::info!(
                "Watch ended ({:?}): {} queued, {} delivered, {} pending",
                summary.end,
                summary.queued,
                summary.delivered,
                summary.pending
            );
            Ok(())
        }
    }
}
