//! Entry types plugin implementation: registers with the Quire plugin system.

use tracing::info;

use quire_core::result::AppResult;
use quire_plugin::prelude::*;

use crate::PLUGIN_ID;

/// Note and like content types.
#[derive(Debug, Default)]
pub struct EntryTypesPlugin;

impl EntryTypesPlugin {
    /// Create a new entry types plugin.
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for EntryTypesPlugin {
    fn info(&self) -> PluginInfo {
        plugin_info!(
            id: PLUGIN_ID,
            name: "Entry Types",
            version: env!("CARGO_PKG_VERSION"),
            description: "Note and like content types with derived names and slugs",
            author: "Quire Team"
        )
    }

    fn register_hooks(&self, hooks: &PluginHooks<'_>) -> AppResult<()> {
        crate::hooks::register_all(hooks);

        info!(
            plugin_id = hooks.plugin_id(),
            "Entry types hooks registered: entries.registered_types, entries.set_name, entries.set_slug"
        );
        Ok(())
    }
}
