//! `quire hooks`: lists every registered callback.

use serde::Serialize;
use tabled::Tabled;

use quire_core::result::AppResult;
use quire_plugin::{CallbackInfo, PluginManager};

use crate::output::{self, OutputFormat};

/// One row of the hook listing.
#[derive(Debug, Serialize, Tabled)]
pub struct HookRow {
    /// Hook name
    #[tabled(rename = "Hook")]
    pub hook: String,
    /// Priority
    #[tabled(rename = "Priority")]
    pub priority: i32,
    /// Accepted argument count
    #[tabled(rename = "Args")]
    pub accepted_args: usize,
    /// Owning plugin
    #[tabled(rename = "Plugin")]
    pub owner: String,
    /// Callback label
    #[tabled(rename = "Callback")]
    pub label: String,
}

impl From<CallbackInfo> for HookRow {
    fn from(info: CallbackInfo) -> Self {
        Self {
            hook: info.hook,
            priority: info.priority,
            accepted_args: info.accepted_args,
            owner: info.owner.unwrap_or_else(|| "-".to_string()),
            label: info.label,
        }
    }
}

/// Execute the hooks command
pub fn execute(manager: &PluginManager, format: OutputFormat) -> AppResult<()> {
    let rows: Vec<HookRow> = manager
        .hook_registry()
        .describe()
        .into_iter()
        .map(HookRow::from)
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
