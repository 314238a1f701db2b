//! Integration tests for action dispatch.

use std::thread;

use serde_json::json;

use quire_core::types::EntrySnapshot;
use quire_plugin::{HookError, HookName, RegisterOptions, entries};

use crate::helpers::{self, TestHooks};

#[test]
fn test_action_notifies_all_in_order() {
    let hooks = TestHooks::new();
    let log = helpers::call_log();

    for (priority, tag) in [(20, "late"), (10, "early"), (10, "early-2")] {
        let sink = log.clone();
        hooks.registry.register(
            HookName::from_static("entries.saved"),
            RegisterOptions::default().with_priority(priority),
            move |args| {
                sink.lock().expect("lock").push(format!("{tag}:{}", args.len()));
                Ok(json!("discarded"))
            },
        );
    }

    hooks
        .dispatcher
        .do_action("entries.saved", &[json!({"id": 1}), json!("extra")])
        .expect("action");
    assert_eq!(
        helpers::entries_of(&log),
        vec!["early:1", "early-2:1", "late:1"]
    );
}

#[test]
fn test_action_without_listeners_is_noop() {
    let hooks = TestHooks::new();
    hooks
        .dispatcher
        .do_action("entries.saved", &[json!(1)])
        .expect("no-op");
}

#[test]
fn test_action_error_stops_notification() {
    let hooks = TestHooks::new();
    let log = helpers::call_log();

    entries::SAVED.add(&hooks.registry, RegisterOptions::default(), |_entry| {
        Err(HookError::callback("index unavailable"))
    });
    let sink = log.clone();
    entries::SAVED.add(
        &hooks.registry,
        RegisterOptions::default().with_priority(50),
        move |(entry,)| {
            sink.lock().expect("lock").push(entry.entry_type);
            Ok(())
        },
    );

    let err = entries::SAVED
        .fire(&hooks.dispatcher, (EntrySnapshot::new("note", "hi"),))
        .expect_err("first listener fails");
    assert_eq!(err.to_string(), "index unavailable");
    assert!(helpers::entries_of(&log).is_empty());
}

#[test]
fn test_concurrent_dispatch_and_registration() {
    let hooks = TestHooks::new();
    hooks.append("x", 10, "a");

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..100 {
                    let result = hooks
                        .dispatcher
                        .apply_filters("x", json!(""), &[])
                        .expect("apply");
                    let text = result.as_str().expect("string").to_string();
                    assert!(text.starts_with('a'));
                }
            });
        }
        scope.spawn(|| {
            for _ in 0..50 {
                hooks.append("x", 20, "z");
            }
        });
    });

    assert_eq!(hooks.registry.callback_count("x"), 51);
}
