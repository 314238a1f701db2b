//! Hook callbacks for the entry types plugin.

use std::collections::BTreeMap;

use tracing::debug;

use quire_core::types::{EntrySnapshot, EntryTypeDescriptor};
use quire_plugin::prelude::*;

use crate::ENTRY_TYPES;
use crate::naming::{name_from_content, random_slug};

/// Priority of the type registration callback.
pub const REGISTER_TYPES_PRIORITY: i32 = DEFAULT_PRIORITY;

/// Priority of the name and slug callbacks; runs after default-priority
/// callbacks so it sees their output.
pub const DERIVE_PRIORITY: i32 = 20;

/// Adds the `note` and `like` content types.
pub fn register_types(
    mut types: BTreeMap<String, EntryTypeDescriptor>,
) -> Result<BTreeMap<String, EntryTypeDescriptor>, HookError> {
    types.insert(
        "note".to_string(),
        EntryTypeDescriptor::with_icon("mdi mdi-message-outline"),
    );
    types.insert(
        "like".to_string(),
        EntryTypeDescriptor::with_icon("mdi mdi-star-outline"),
    );
    Ok(types)
}

/// Names notes and likes after their content.
pub fn set_name(name: String, (entry,): (EntrySnapshot,)) -> Result<String, HookError> {
    if !entry.is_type_in(&ENTRY_TYPES) {
        return Ok(name);
    }
    let derived = name_from_content(&entry.content);
    debug!(entry_id = %entry.id, entry_type = %entry.entry_type, "Derived entry name");
    Ok(derived)
}

/// Gives new notes and likes a random slug.
pub fn set_slug(
    slug: Option<String>,
    (entry,): (EntrySnapshot,),
) -> Result<Option<String>, HookError> {
    if !entry.is_type_in(&ENTRY_TYPES) || entry.has_slug() {
        return Ok(slug);
    }
    let generated = random_slug();
    debug!(entry_id = %entry.id, slug = %generated, "Generated random slug");
    Ok(Some(generated))
}

/// Registers all callbacks through the plugin's hook view.
pub fn register_all(hooks: &PluginHooks<'_>) {
    hooks.add_value_filter(
        &entries::REGISTERED_TYPES,
        RegisterOptions::default()
            .with_priority(REGISTER_TYPES_PRIORITY)
            .with_label("entry_types::register_types"),
        register_types,
    );

    hooks.add_filter(
        &entries::SET_NAME,
        RegisterOptions::default()
            .with_priority(DERIVE_PRIORITY)
            .with_label("entry_types::set_name"),
        set_name,
    );

    hooks.add_filter(
        &entries::SET_SLUG,
        RegisterOptions::default()
            .with_priority(DERIVE_PRIORITY)
            .with_label("entry_types::set_slug"),
        set_slug,
    );
}
