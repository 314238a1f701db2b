//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};

use serde_json::Value;

use quire_core::config::AppConfig;
use quire_plugin::{HookDispatcher, HookName, HookRegistry, PluginManager, RegisterOptions};

/// Test context holding a bare registry and its dispatcher.
pub struct TestHooks {
    /// Hook registry
    pub registry: Arc<HookRegistry>,
    /// Dispatcher over `registry`
    pub dispatcher: HookDispatcher,
}

impl TestHooks {
    /// Create an empty registry
    pub fn new() -> Self {
        let registry = Arc::new(HookRegistry::new());
        let dispatcher = HookDispatcher::new(registry.clone());
        Self {
            registry,
            dispatcher,
        }
    }

    /// Register a string filter appending `suffix`
    pub fn append(&self, hook: &'static str, priority: i32, suffix: &'static str) {
        self.registry.register(
            HookName::from_static(hook),
            RegisterOptions::default().with_priority(priority),
            move |args| {
                let current = args.first().and_then(Value::as_str).unwrap_or_default();
                Ok(Value::from(format!("{current}{suffix}")))
            },
        );
    }
}

/// Shared, lockable call log
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// Create an empty call log
pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Snapshot the contents of a call log
pub fn entries_of(log: &CallLog) -> Vec<String> {
    log.lock().expect("log lock").clone()
}

/// Bootstrap the binary's compiled-in plugins with default configuration
pub fn bootstrapped() -> PluginManager {
    quire::app::bootstrap(&AppConfig::default()).expect("bootstrap")
}
