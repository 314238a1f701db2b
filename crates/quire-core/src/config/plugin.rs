//! Plugin bootstrap configuration.

use serde::{Deserialize, Serialize};

/// Plugin bootstrap configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Ids of compiled-in plugins that must not be loaded.
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl PluginConfig {
    /// Returns whether the plugin with this id may be loaded.
    pub fn is_enabled(&self, plugin_id: &str) -> bool {
        !self.disabled.iter().any(|id| id == plugin_id)
    }
}
