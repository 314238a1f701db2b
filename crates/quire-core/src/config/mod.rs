//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files and `QUIRE__`-prefixed environment variables. Every section
//! has serde defaults, so an absent configuration file is valid.

pub mod logging;
pub mod plugin;

use serde::{Deserialize, Serialize};

pub use self::logging::LoggingConfig;
pub use self::plugin::PluginConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Plugin bootstrap settings.
    #[serde(default)]
    pub plugins: PluginConfig,
}

impl AppConfig {
    /// Load configuration starting from a base file.
    ///
    /// Merges the base file, the `{env}.toml` overlay next to it, and
    /// environment variables prefixed with `QUIRE__`. Missing files are
    /// skipped.
    pub fn load_from(base: &str, env: &str) -> Result<Self, AppError> {
        let base = base.strip_suffix(".toml").unwrap_or(base);
        let overlay = match base.rsplit_once('/') {
            Some((dir, _)) => format!("{dir}/{env}"),
            None => env.to_string(),
        };

        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&overlay).required(false))
            .add_source(
                config::Environment::with_prefix("QUIRE")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("plugins.disabled")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
