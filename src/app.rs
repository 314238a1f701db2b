//! Application wiring: configuration loading and plugin bootstrap.

use std::sync::Arc;

use plugin_entry_types::EntryTypesPlugin;
use quire_core::config::AppConfig;
use quire_core::result::AppResult;
use quire_plugin::{Plugin, PluginManager};

/// Environment variable naming the configuration overlay to apply.
pub const ENV_VAR: &str = "QUIRE_ENV";

/// Overlay used when [`ENV_VAR`] is unset.
pub const DEFAULT_ENV: &str = "development";

/// Loads configuration from `config_path` plus the overlay selected by
/// `QUIRE_ENV`.
pub fn load_config(config_path: &str) -> AppResult<AppConfig> {
    let env = std::env::var(ENV_VAR).unwrap_or_else(|_| DEFAULT_ENV.to_string());
    AppConfig::load_from(config_path, &env)
}

/// Every plugin compiled into the binary.
pub fn compiled_plugins() -> Vec<Arc<dyn Plugin>> {
    vec![Arc::new(EntryTypesPlugin::new())]
}

/// Creates a plugin manager and loads the enabled compiled-in plugins.
pub fn bootstrap(config: &AppConfig) -> AppResult<PluginManager> {
    let manager = PluginManager::new();
    manager.bootstrap(compiled_plugins(), &config.plugins)?;
    Ok(manager)
}
