//! Integration tests for filter dispatch.

use serde_json::{Value, json};

use quire_core::error::{AppError, ErrorKind};
use quire_core::types::EntrySnapshot;
use quire_plugin::{HookError, HookName, RegisterOptions, entries};

use crate::helpers::{self, TestHooks};

#[test]
fn test_unregistered_hook_returns_value_unchanged() {
    let hooks = TestHooks::new();
    for value in [json!(null), json!(""), json!(42), json!({"a": [1, 2]})] {
        let result = hooks
            .dispatcher
            .apply_filters("never.registered", value.clone(), &[json!(1), json!(2)])
            .expect("identity");
        assert_eq!(result, value);
    }
}

#[test]
fn test_lower_priority_runs_first() {
    let hooks = TestHooks::new();
    hooks.append("x", 10, "A");
    hooks.append("x", 5, "B");

    let result = hooks.dispatcher.apply_filters("x", json!(""), &[]).expect("apply");
    assert_eq!(result, json!("BA"));
}

#[test]
fn test_order_is_priority_then_registration() {
    let hooks = TestHooks::new();
    hooks.append("x", 20, "d");
    hooks.append("x", 10, "a");
    hooks.append("x", -5, "first");
    hooks.append("x", 10, "b");
    hooks.append("x", 20, "e");
    hooks.append("x", 10, "c");

    let result = hooks.dispatcher.apply_filters("x", json!(""), &[]).expect("apply");
    assert_eq!(result, json!("firstabcde"));
}

#[test]
fn test_unregister_round_trip_matches_never_registered() {
    let hooks = TestHooks::new();
    hooks.append("x", 10, "A");
    let baseline = hooks.dispatcher.apply_filters("x", json!(">"), &[]).expect("apply");

    let handle = hooks.registry.register(
        HookName::from_static("x"),
        RegisterOptions::default().with_priority(5),
        |_args| Ok(json!("replaced")),
    );
    assert!(hooks.registry.unregister(&handle));
    assert!(!hooks.registry.unregister(&handle));

    let after = hooks.dispatcher.apply_filters("x", json!(">"), &[]).expect("apply");
    assert_eq!(after, baseline);
}

#[test]
fn test_zero_arity_ignores_supplied_arguments() {
    let hooks = TestHooks::new();
    let log = helpers::call_log();
    let sink = log.clone();
    hooks.registry.register(
        HookName::from_static("x"),
        RegisterOptions::default().with_accepted_args(0),
        move |args| {
            sink.lock().expect("lock").push(args.len().to_string());
            Ok(json!("zero"))
        },
    );

    let result = hooks
        .dispatcher
        .apply_filters("x", json!("v"), &[json!(1), json!(2), json!(3), json!(4)])
        .expect("apply");
    assert_eq!(result, json!("zero"));
    assert_eq!(helpers::entries_of(&log), vec!["0"]);
}

#[test]
fn test_chain_composes_in_priority_order() {
    let hooks = TestHooks::new();
    hooks.registry.register(
        HookName::from_static("compose"),
        RegisterOptions::default().with_priority(20),
        |args| Ok(json!(format!("g({})", args[0].as_str().unwrap_or_default()))),
    );
    hooks.registry.register(
        HookName::from_static("compose"),
        RegisterOptions::default().with_priority(10),
        |args| Ok(json!(format!("f({})", args[0].as_str().unwrap_or_default()))),
    );

    let result = hooks
        .dispatcher
        .apply_filters("compose", json!("v"), &[])
        .expect("apply");
    assert_eq!(result, json!("g(f(v))"));
}

#[test]
fn test_first_error_stops_chain_and_reaches_caller() {
    let hooks = TestHooks::new();
    let log = helpers::call_log();

    hooks.registry.register(
        HookName::from_static("x"),
        RegisterOptions::default().with_priority(10),
        |_args| {
            Err(HookError::callback_with_source(
                "disk full",
                std::io::Error::other("ENOSPC"),
            ))
        },
    );
    let sink = log.clone();
    hooks.registry.register(
        HookName::from_static("x"),
        RegisterOptions::default().with_priority(20),
        move |args| {
            sink.lock().expect("lock").push("second".to_string());
            Ok(args.into_iter().next().unwrap_or_default())
        },
    );

    let err = hooks
        .dispatcher
        .apply_filters("x", json!("v"), &[])
        .expect_err("first callback fails");

    assert!(helpers::entries_of(&log).is_empty());
    match &err {
        HookError::Callback { message, source } => {
            assert_eq!(message, "disk full");
            let source = source.as_ref().expect("source kept");
            assert_eq!(source.to_string(), "ENOSPC");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let app: AppError = err.into();
    assert_eq!(app.kind, ErrorKind::Plugin);
}

#[test]
fn test_slug_override_only_for_notes() {
    let hooks = TestHooks::new();
    hooks.registry.register(
        HookName::from_static("entries.set_slug"),
        RegisterOptions::default().with_accepted_args(2),
        |args| {
            let is_note = args
                .get(1)
                .and_then(|entry| entry.get("type"))
                .and_then(Value::as_str)
                == Some("note");
            if is_note {
                Ok(json!("custom-slug"))
            } else {
                Ok(args.into_iter().next().unwrap_or_default())
            }
        },
    );

    let note = serde_json::to_value(EntrySnapshot::new("note", "hi")).expect("encode");
    let slug = hooks
        .dispatcher
        .apply_filters("entries.set_slug", Value::Null, &[note])
        .expect("apply");
    assert_eq!(slug, json!("custom-slug"));

    let article = serde_json::to_value(EntrySnapshot::new("article", "hi")).expect("encode");
    let slug = hooks
        .dispatcher
        .apply_filters("entries.set_slug", Value::Null, &[article])
        .expect("apply");
    assert_eq!(slug, Value::Null);
}

#[test]
fn test_typed_filter_rejects_wrong_shape() {
    let hooks = TestHooks::new();
    hooks.registry.register(
        entries::SET_NAME.name().clone(),
        RegisterOptions::default(),
        |_args| Ok(json!(["not", "a", "string"])),
    );

    let err = entries::SET_NAME
        .apply(
            &hooks.dispatcher,
            "Title".to_string(),
            (EntrySnapshot::new("article", ""),),
        )
        .expect_err("array is not a name");
    assert!(matches!(err, HookError::Decode { position: 0, .. }));
}
