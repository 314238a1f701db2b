//! Hook registry: plugins register callbacks by hook name with priority
//! ordering.
//!
//! Each hook's callbacks are kept sorted by `(priority, order)`, where
//! `order` is a registry-wide sequence number, so ties resolve to
//! registration order. Lists are copy-on-write: every mutation builds a new
//! list and swaps it in, and readers only ever hold an immutable snapshot.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::callback::HookCallback;
use super::definitions::HookName;
use crate::error::HookError;

/// Priority used when the caller does not pick one.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Accepted-argument count used when the caller does not pick one.
pub const DEFAULT_ACCEPTED_ARGS: usize = 1;

const ANONYMOUS_LABEL: &str = "<closure>";

/// Options attached to a registration.
#[derive(Debug, Clone)]
pub struct RegisterOptions {
    /// Ordering key; lower runs earlier.
    pub priority: i32,
    /// Number of leading dispatch arguments passed to the callback.
    pub accepted_args: usize,
    /// Plugin that owns the registration.
    pub owner: Option<String>,
    /// Name shown in logs and listings.
    pub label: Option<String>,
}

impl RegisterOptions {
    /// Creates options with an explicit priority and argument count.
    pub fn new(priority: i32, accepted_args: usize) -> Self {
        Self {
            priority,
            accepted_args,
            owner: None,
            label: None,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the accepted-argument count.
    pub fn with_accepted_args(mut self, accepted_args: usize) -> Self {
        self.accepted_args = accepted_args;
        self
    }

    /// Sets the owning plugin.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Sets the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Default for RegisterOptions {
    fn default() -> Self {
        Self::new(DEFAULT_PRIORITY, DEFAULT_ACCEPTED_ARGS)
    }
}

/// Token identifying exactly one registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistrationHandle {
    hook: HookName,
    order: u64,
}

impl RegistrationHandle {
    /// Returns the hook the registration belongs to.
    pub fn hook(&self) -> &HookName {
        &self.hook
    }
}

/// One callback registered under a hook.
#[derive(Clone)]
pub struct CallbackRegistration {
    callback: Arc<dyn HookCallback>,
    priority: i32,
    accepted_args: usize,
    order: u64,
    owner: Option<String>,
    label: Option<String>,
}

impl CallbackRegistration {
    /// Returns the priority.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns how many leading arguments the callback receives.
    pub fn accepted_args(&self) -> usize {
        self.accepted_args
    }

    /// Returns the registration sequence number.
    pub fn order(&self) -> u64 {
        self.order
    }

    /// Returns the owning plugin, if any.
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Returns the label, or `"<closure>"` when none was given.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(ANONYMOUS_LABEL)
    }

    /// Invokes the callback with already-sliced arguments.
    pub fn invoke(&self, args: Vec<Value>) -> Result<Value, HookError> {
        self.callback.invoke(args)
    }

    fn sort_key(&self) -> (i32, u64) {
        (self.priority, self.order)
    }
}

impl fmt::Debug for CallbackRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistration")
            .field("label", &self.label())
            .field("priority", &self.priority)
            .field("accepted_args", &self.accepted_args)
            .field("order", &self.order)
            .field("owner", &self.owner)
            .finish()
    }
}

/// Immutable, ordered view of one hook's callbacks.
///
/// Registrations made or removed after the snapshot was taken are not
/// visible through it.
#[derive(Debug, Clone, Default)]
pub struct CallbackSnapshot {
    entries: Option<Arc<Vec<CallbackRegistration>>>,
}

impl Deref for CallbackSnapshot {
    type Target = [CallbackRegistration];

    fn deref(&self) -> &Self::Target {
        self.entries.as_deref().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Listing row describing one registration.
#[derive(Debug, Clone, Serialize)]
pub struct CallbackInfo {
    /// Hook name.
    pub hook: String,
    /// Priority.
    pub priority: i32,
    /// Accepted-argument count.
    pub accepted_args: usize,
    /// Registration sequence number.
    pub order: u64,
    /// Owning plugin.
    pub owner: Option<String>,
    /// Label.
    pub label: String,
}

/// Registry of hook callbacks organized by hook name.
pub struct HookRegistry {
    /// Hook name → callbacks sorted by `(priority, order)`.
    hooks: DashMap<HookName, Arc<Vec<CallbackRegistration>>>,
    /// Next registration sequence number.
    next_order: AtomicU64,
}

impl HookRegistry {
    /// Creates a new empty hook registry.
    pub fn new() -> Self {
        Self {
            hooks: DashMap::new(),
            next_order: AtomicU64::new(0),
        }
    }

    /// Registers a closure under a hook.
    ///
    /// Never fails. Registering the same callback twice makes it run twice.
    pub fn register<F>(
        &self,
        hook: HookName,
        options: RegisterOptions,
        callback: F,
    ) -> RegistrationHandle
    where
        F: Fn(Vec<Value>) -> Result<Value, HookError> + Send + Sync + 'static,
    {
        self.register_callback(hook, options, Arc::new(callback))
    }

    /// Registers a shared callback object under a hook.
    pub fn register_callback(
        &self,
        hook: HookName,
        options: RegisterOptions,
        callback: Arc<dyn HookCallback>,
    ) -> RegistrationHandle {
        let order = self.next_order.fetch_add(1, Ordering::Relaxed);
        let registration = CallbackRegistration {
            callback,
            priority: options.priority,
            accepted_args: options.accepted_args,
            order,
            owner: options.owner,
            label: options.label,
        };

        info!(
            hook = %hook,
            label = registration.label(),
            owner = registration.owner().unwrap_or("-"),
            priority = registration.priority,
            accepted_args = registration.accepted_args,
            "Hook callback registered"
        );

        let mut slot = self.hooks.entry(hook.clone()).or_default();
        let mut entries = Vec::with_capacity(slot.len() + 1);
        entries.extend(slot.iter().cloned());
        let key = registration.sort_key();
        let position = entries.partition_point(|e| e.sort_key() < key);
        entries.insert(position, registration);
        *slot = Arc::new(entries);

        RegistrationHandle { hook, order }
    }

    /// Removes the registration identified by `handle`.
    ///
    /// Returns whether anything was removed; stale handles are a no-op.
    pub fn unregister(&self, handle: &RegistrationHandle) -> bool {
        let removed = match self.hooks.get_mut(handle.hook.as_str()) {
            Some(mut slot) => match slot.iter().position(|e| e.order == handle.order) {
                Some(position) => {
                    let mut entries = Vec::clone(&slot);
                    entries.remove(position);
                    *slot = Arc::new(entries);
                    true
                }
                None => false,
            },
            None => false,
        };

        if removed {
            self.hooks
                .remove_if(handle.hook.as_str(), |_, entries| entries.is_empty());
            debug!(hook = %handle.hook, order = handle.order, "Hook callback unregistered");
        }

        removed
    }

    /// Removes every registration under a hook, returning how many there were.
    pub fn remove_all(&self, hook: impl AsRef<str>) -> usize {
        let hook = hook.as_ref();
        let removed = self
            .hooks
            .remove(hook)
            .map(|(_, entries)| entries.len())
            .unwrap_or(0);

        if removed > 0 {
            info!(hook = %hook, removed, "All callbacks removed from hook");
        }
        removed
    }

    /// Removes every registration owned by a plugin, across all hooks.
    pub fn unregister_owner(&self, owner: &str) -> usize {
        let mut removed = 0;

        self.hooks.retain(|_, entries| {
            if entries.iter().any(|e| e.owner() == Some(owner)) {
                let kept: Vec<CallbackRegistration> = entries
                    .iter()
                    .filter(|e| e.owner() != Some(owner))
                    .cloned()
                    .collect();
                removed += entries.len() - kept.len();
                *entries = Arc::new(kept);
            }
            !entries.is_empty()
        });

        info!(owner = %owner, removed, "Hook callbacks unregistered for plugin");
        removed
    }

    /// Returns whether any callback is registered under a hook.
    pub fn has_callbacks(&self, hook: impl AsRef<str>) -> bool {
        self.hooks
            .get(hook.as_ref())
            .map(|entries| !entries.is_empty())
            .unwrap_or(false)
    }

    /// Returns the callbacks under a hook, in dispatch order.
    pub fn callbacks_for(&self, hook: impl AsRef<str>) -> CallbackSnapshot {
        CallbackSnapshot {
            entries: self.hooks.get(hook.as_ref()).map(|e| Arc::clone(e.value())),
        }
    }

    /// Returns the number of callbacks registered under a hook.
    pub fn callback_count(&self, hook: impl AsRef<str>) -> usize {
        self.hooks
            .get(hook.as_ref())
            .map(|entries| entries.len())
            .unwrap_or(0)
    }

    /// Returns the total number of registrations.
    pub fn len(&self) -> usize {
        self.hooks.iter().map(|entries| entries.len()).sum()
    }

    /// Returns whether the registry holds no registrations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns every hook with at least one callback, sorted by name.
    pub fn registered_hooks(&self) -> Vec<HookName> {
        let mut hooks: Vec<HookName> = self.hooks.iter().map(|e| e.key().clone()).collect();
        hooks.sort();
        hooks
    }

    /// Describes every registration, grouped by hook in dispatch order.
    pub fn describe(&self) -> Vec<CallbackInfo> {
        self.registered_hooks()
            .into_iter()
            .flat_map(|hook| {
                let snapshot = self.callbacks_for(&hook);
                snapshot
                    .iter()
                    .map(|registration| CallbackInfo {
                        hook: hook.to_string(),
                        priority: registration.priority(),
                        accepted_args: registration.accepted_args(),
                        order: registration.order(),
                        owner: registration.owner().map(str::to_string),
                        label: registration.label().to_string(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &self.hooks.len())
            .field("callbacks", &self.len())
            .finish()
    }
}
