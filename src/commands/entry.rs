//! `quire entry`: runs an entry through the save hooks and prints the result.

use clap::Args;

use quire_core::error::AppError;
use quire_core::result::AppResult;
use quire_core::types::EntrySnapshot;
use quire_plugin::PluginManager;

use crate::entries;
use crate::output::{self, OutputFormat};

/// Arguments for the entry command
#[derive(Debug, Args)]
pub struct EntryArgs {
    /// Content type, e.g. `article` or `note`
    #[arg(short = 't', long = "type")]
    pub entry_type: String,
    /// Entry content
    #[arg(long)]
    pub content: String,
    /// Author-supplied name
    #[arg(long)]
    pub name: Option<String>,
    /// Previously stored slug
    #[arg(long)]
    pub slug: Option<String>,
}

/// Execute the entry command
pub fn execute(args: &EntryArgs, manager: &PluginManager, format: OutputFormat) -> AppResult<()> {
    let dispatcher = manager.dispatcher();

    let types = entries::registered_types(dispatcher)?;
    if !types.contains_key(&args.entry_type) {
        return Err(AppError::validation(format!(
            "Unknown entry type '{}' (known: {})",
            args.entry_type,
            types.keys().cloned().collect::<Vec<_>>().join(", ")
        )));
    }

    let mut entry = EntrySnapshot::new(&args.entry_type, &args.content);
    entry.name = args.name.clone();
    entry.slug = args.slug.clone();

    let saved = entries::save(dispatcher, entry)?;

    match format {
        OutputFormat::Json => output::print_json(&saved),
        OutputFormat::Table => {
            output::print_success(&format!("Saved {} entry", saved.entry_type));
            output::print_kv("Id", &saved.id.to_string());
            output::print_kv("Name", saved.name.as_deref().unwrap_or_default());
            output::print_kv("Slug", saved.slug.as_deref().unwrap_or_default());
        }
    }

    Ok(())
}
