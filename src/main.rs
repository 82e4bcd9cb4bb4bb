//! clubdesk command-line client
//!
//! Drives the club administration REST API from the terminal.

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use clubdesk::config::{Config, LogFormat};
use clubdesk::confirm::{AlwaysConfirm, Confirm, StdinConfirm};
use clubdesk::errors::ClientError;
use clubdesk::Clubdesk;

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    init_tracing(&config);
    tracing::debug!("API base URL: {}", config.api_url);

    let confirm: Arc<dyn Confirm> = if cli.yes {
        Arc::new(AlwaysConfirm)
    } else {
        Arc::new(StdinConfirm)
    };

    let club = match Clubdesk::from_config(&config, confirm) {
        Ok(club) => club,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli::run(&club, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    // stdout carries command output; logs go to stderr.
    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn print_error(err: &ClientError) {
    match err {
        ClientError::Validation { errors, .. } => {
            eprintln!("{}", err.message());
            for (field, messages) in errors.failing_fields() {
                for message in messages {
                    eprintln!("  {}: {}", field, message);
                }
            }
        }
        _ => match err.redirect() {
            Some(route) => eprintln!("{} (see {})", err, route),
            None => eprintln!("{}", err),
        },
    }
}
