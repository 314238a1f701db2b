//! Integration tests for the entry types plugin running inside the host.

use quire::entries;
use quire_core::types::EntrySnapshot;
use quire_plugin::{RegisterOptions, entries as hooks};

use crate::helpers;

#[test]
fn test_types_include_core_and_plugin() {
    let manager = helpers::bootstrapped();
    let types = entries::registered_types(manager.dispatcher()).expect("types");

    assert_eq!(
        types.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["article", "like", "note", "page"]
    );
    assert_eq!(types["like"].icon.as_deref(), Some("mdi mdi-star-outline"));
}

#[test]
fn test_note_saved_with_derived_name_and_random_slug() {
    let manager = helpers::bootstrapped();
    let entry = EntrySnapshot::new(
        "note",
        "<p>Walked along the river this morning and the fog was still sitting low over the water</p>",
    );

    let saved = entries::save(manager.dispatcher(), entry).expect("save");
    assert_eq!(
        saved.name.as_deref(),
        Some("Walked along the river this morning and the fog was …")
    );
    let slug = saved.slug.expect("slug");
    assert_eq!(slug.len(), plugin_entry_types::naming::SLUG_LEN);
    assert_ne!(slug, "walked-along-the-river-this-morning-and-the-fog-was");
}

#[test]
fn test_article_uses_host_slug() {
    let manager = helpers::bootstrapped();
    let entry = EntrySnapshot::new("article", "Body").with_name("Release Notes 1.2");

    let saved = entries::save(manager.dispatcher(), entry).expect("save");
    assert_eq!(saved.name.as_deref(), Some("Release Notes 1.2"));
    assert_eq!(saved.slug.as_deref(), Some("release-notes-1-2"));
}

#[test]
fn test_like_keeps_stored_slug() {
    let manager = helpers::bootstrapped();
    let entry = EntrySnapshot::new("like", "https://example.org").with_slug("liked-before");

    let saved = entries::save(manager.dispatcher(), entry).expect("save");
    assert_eq!(saved.slug.as_deref(), Some("liked-before"));
}

#[test]
fn test_later_slug_filter_overrides_plugin() {
    let manager = helpers::bootstrapped();
    hooks::SET_SLUG.add_value(
        manager.hook_registry(),
        RegisterOptions::default().with_priority(100),
        |slug| Ok(slug.map(|s| format!("n-{s}"))),
    );

    let slug = entries::derive_slug(manager.dispatcher(), &EntrySnapshot::new("note", "x"))
        .expect("slug");
    assert!(slug.starts_with("n-"));

    let article = EntrySnapshot::new("article", "x").with_name("Plain");
    let slug = entries::derive_slug(manager.dispatcher(), &article).expect("slug");
    assert_eq!(slug, "plain");
}

#[test]
fn test_saved_listeners_see_final_entry() {
    let manager = helpers::bootstrapped();
    let log = helpers::call_log();
    let sink = log.clone();
    hooks::SAVED.add(
        manager.hook_registry(),
        RegisterOptions::default(),
        move |(entry,)| {
            sink.lock()
                .expect("lock")
                .push(entry.slug.unwrap_or_default());
            Ok(())
        },
    );

    let saved = entries::save(
        manager.dispatcher(),
        EntrySnapshot::new("page", "").with_name("Contact"),
    )
    .expect("save");

    assert_eq!(saved.slug.as_deref(), Some("contact"));
    assert_eq!(helpers::entries_of(&log), vec!["contact"]);
}

#[test]
fn test_unloading_plugin_restores_host_defaults() {
    let manager = helpers::bootstrapped();
    manager
        .unload_plugin(plugin_entry_types::PLUGIN_ID)
        .expect("unload");

    let types = entries::registered_types(manager.dispatcher()).expect("types");
    assert_eq!(types.len(), 2);

    let note = EntrySnapshot::new("note", "some words").with_name("Named");
    let saved = entries::save(manager.dispatcher(), note).expect("save");
    assert_eq!(saved.name.as_deref(), Some("Named"));
    assert_eq!(saved.slug.as_deref(), Some("named"));
}
