//! Entry save flow as seen by the host.
//!
//! The host owns the defaults: the built-in content types, the author's
//! name, and a slug derived from the name. Plugins adjust each of these
//! through the entry hooks.

use std::collections::BTreeMap;

use tracing::debug;

use quire_core::types::{EntrySnapshot, EntryTypeDescriptor};
use quire_plugin::{HookDispatcher, HookError, entries};

/// Content types every installation has.
pub const CORE_TYPES: [(&str, &str); 2] = [
    ("article", "mdi mdi-file-document-outline"),
    ("page", "mdi mdi-book-open-page-variant-outline"),
];

/// Returns all content types, core ones first filtered through
/// `entries.registered_types`.
pub fn registered_types(
    dispatcher: &HookDispatcher,
) -> Result<BTreeMap<String, EntryTypeDescriptor>, HookError> {
    let defaults = CORE_TYPES
        .iter()
        .map(|(name, icon)| (name.to_string(), EntryTypeDescriptor::with_icon(*icon)))
        .collect();
    entries::REGISTERED_TYPES.apply(dispatcher, defaults, ())
}

/// Returns the display name for `entry`, starting from the author's name.
pub fn derive_name(dispatcher: &HookDispatcher, entry: &EntrySnapshot) -> Result<String, HookError> {
    let name = entry.name.clone().unwrap_or_default();
    entries::SET_NAME.apply(dispatcher, name, (entry.clone(),))
}

/// Returns the slug for `entry`.
///
/// A non-empty slug supplied through `entries.set_slug` wins; an empty one
/// counts as no override. Otherwise the entry keeps its stored slug, or gets
/// one derived from its name, or finally its id.
pub fn derive_slug(dispatcher: &HookDispatcher, entry: &EntrySnapshot) -> Result<String, HookError> {
    if let Some(slug) = entries::SET_SLUG
        .apply(dispatcher, None, (entry.clone(),))?
        .filter(|s| !s.is_empty())
    {
        return Ok(slug);
    }

    if let Some(slug) = entry.slug.as_deref().filter(|s| !s.is_empty()) {
        return Ok(slug.to_string());
    }

    let slug = slugify(entry.name.as_deref().unwrap_or_default());
    if slug.is_empty() {
        Ok(entry.id.to_string())
    } else {
        Ok(slug)
    }
}

/// Derives name and slug for `entry`, then fires `entries.saved` with the
/// result.
pub fn save(dispatcher: &HookDispatcher, mut entry: EntrySnapshot) -> Result<EntrySnapshot, HookError> {
    let name = derive_name(dispatcher, &entry)?;
    entry.name = Some(name);

    let slug = derive_slug(dispatcher, &entry)?;
    entry.slug = Some(slug);

    debug!(
        entry_id = %entry.id,
        entry_type = %entry.entry_type,
        slug = entry.slug.as_deref().unwrap_or_default(),
        "Entry saved"
    );

    entries::SAVED.fire(dispatcher, (entry.clone(),))?;
    Ok(entry)
}

/// Lowercases `input` and joins its alphanumeric runs with `-`.
pub fn slugify(input: &str) -> String {
    input
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use quire_plugin::{HookRegistry, RegisterOptions};

    use super::*;

    fn dispatcher() -> (Arc<HookRegistry>, HookDispatcher) {
        let registry = Arc::new(HookRegistry::new());
        (registry.clone(), HookDispatcher::new(registry))
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Ünïcode -- stays  "), "ünïcode-stays");
        assert_eq!(slugify("…"), "");
    }

    #[test]
    fn test_core_types_without_plugins() {
        let (_registry, dispatcher) = dispatcher();
        let types = registered_types(&dispatcher).expect("types");
        assert_eq!(types.keys().collect::<Vec<_>>(), vec!["article", "page"]);
    }

    #[test]
    fn test_host_slug_fallbacks() {
        let (_registry, dispatcher) = dispatcher();

        let named = EntrySnapshot::new("article", "").with_name("My First Post");
        assert_eq!(derive_slug(&dispatcher, &named).expect("slug"), "my-first-post");

        let stored = named.clone().with_slug("kept");
        assert_eq!(derive_slug(&dispatcher, &stored).expect("slug"), "kept");

        let untitled = EntrySnapshot::new("article", "");
        assert_eq!(
            derive_slug(&dispatcher, &untitled).expect("slug"),
            untitled.id.to_string()
        );
    }

    #[test]
    fn test_filter_slug_overrides_host() {
        let (registry, dispatcher) = dispatcher();
        entries::SET_SLUG.add_value(&registry, RegisterOptions::default(), |_slug| {
            Ok(Some("from-plugin".to_string()))
        });

        let entry = EntrySnapshot::new("article", "").with_name("Ignored");
        assert_eq!(derive_slug(&dispatcher, &entry).expect("slug"), "from-plugin");
    }

    #[test]
    fn test_empty_filter_slug_falls_back_to_host() {
        let (registry, dispatcher) = dispatcher();
        entries::SET_SLUG.add_value(&registry, RegisterOptions::default(), |_slug| {
            Ok(Some(String::new()))
        });

        let entry = EntrySnapshot::new("article", "").with_name("Host Wins");
        assert_eq!(derive_slug(&dispatcher, &entry).expect("slug"), "host-wins");
    }

    #[test]
    fn test_save_fires_saved_with_final_entry() {
        let (registry, dispatcher) = dispatcher();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        entries::SAVED.add(&registry, RegisterOptions::default(), move |(entry,)| {
            sink.lock().expect("lock").push(entry);
            Ok(())
        });

        let saved = save(&dispatcher, EntrySnapshot::new("page", "").with_name("About Us"))
            .expect("save");

        assert_eq!(saved.slug.as_deref(), Some("about-us"));
        assert_eq!(*seen.lock().expect("lock"), vec![saved]);
    }
}
