//! Quire CLI entry point.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use quire::commands::Cli;
use quire::output;
use quire_core::config::LoggingConfig;

fn main() {
    let cli = Cli::parse();

    let config = match quire::app::load_config(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            output::print_error(&format!("Failed to load configuration: {}", e));
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    tracing::debug!(config = %cli.config, "Configuration loaded");

    if let Err(e) = cli.execute(&config) {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initialize tracing/logging. Output goes to stderr so command output on
/// stdout stays machine-readable.
fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
