//! CLI command definitions and dispatch.

pub mod entry;
pub mod hooks;
pub mod types;

use clap::{Parser, Subcommand};

use quire_core::config::AppConfig;
use quire_core::result::AppResult;

use crate::output::OutputFormat;

/// Quire content hooks and plugins
#[derive(Debug, Parser)]
#[command(name = "quire", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List registered hooks and their callbacks
    Hooks,
    /// List registered content types
    Types,
    /// Run an entry through the save hooks
    Entry(entry::EntryArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let manager = crate::app::bootstrap(config)?;

        let result = match &self.command {
            Commands::Hooks => hooks::execute(&manager, self.format),
            Commands::Types => types::execute(&manager, self.format),
            Commands::Entry(args) => entry::execute(args, &manager, self.format),
        };

        manager.unload_all();
        result
    }
}
