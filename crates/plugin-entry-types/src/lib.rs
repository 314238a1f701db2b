//! Entry types plugin for Quire.
//!
//! Adds the `note` and `like` content types. Neither has an author-supplied
//! title, so the plugin derives a display name from the content and gives
//! new entries a random slug.

pub mod hooks;
pub mod naming;
pub mod plugin;

pub use plugin::EntryTypesPlugin;

/// Plugin identifier used for ownership and in `plugins.disabled`.
pub const PLUGIN_ID: &str = "entry-types";

/// Content types contributed by this plugin.
pub const ENTRY_TYPES: [&str; 2] = ["note", "like"];
