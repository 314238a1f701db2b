//! Hook dispatcher: runs every callback registered under a hook, in order.
//!
//! Filters thread a value through the callbacks: each callback receives the
//! current value followed by the extra arguments, cut down to the number of
//! arguments it accepts, and its return value becomes the current value.
//! Actions pass the same arguments and discard return values.
//!
//! Dispatch is synchronous and sequential. The first failing callback stops
//! the chain and its error is returned to the caller untouched.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::registry::{CallbackRegistration, HookRegistry};
use crate::error::HookError;

/// Dispatches hooks to all registered callbacks.
#[derive(Debug, Clone)]
pub struct HookDispatcher {
    /// Hook registry.
    registry: Arc<HookRegistry>,
}

impl HookDispatcher {
    /// Creates a new hook dispatcher.
    pub fn new(registry: Arc<HookRegistry>) -> Self {
        Self { registry }
    }

    /// Threads `value` through every callback registered under `hook` and
    /// returns the final value.
    ///
    /// With no callbacks registered the value is returned unchanged.
    pub fn apply_filters(
        &self,
        hook: impl AsRef<str>,
        value: Value,
        extra: &[Value],
    ) -> Result<Value, HookError> {
        let hook = hook.as_ref();
        let callbacks = self.registry.callbacks_for(hook);
        if callbacks.is_empty() {
            return Ok(value);
        }

        debug!(
            hook = %hook,
            callback_count = callbacks.len(),
            extra_args = extra.len(),
            "Applying filters"
        );

        let mut current = value;
        for registration in callbacks.iter() {
            let args = filter_args(registration.accepted_args(), current, extra);
            current = invoke(hook, registration, args)?;
        }

        Ok(current)
    }

    /// Calls every callback registered under `hook` for its side effects.
    pub fn do_action(&self, hook: impl AsRef<str>, args: &[Value]) -> Result<(), HookError> {
        let hook = hook.as_ref();
        let callbacks = self.registry.callbacks_for(hook);
        if callbacks.is_empty() {
            return Ok(());
        }

        debug!(
            hook = %hook,
            callback_count = callbacks.len(),
            args = args.len(),
            "Doing action"
        );

        for registration in callbacks.iter() {
            let sliced = args[..registration.accepted_args().min(args.len())].to_vec();
            invoke(hook, registration, sliced)?;
        }

        Ok(())
    }

    /// Returns a reference to the hook registry.
    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }
}

/// Builds `[current, extra...]` truncated to `accepted` values.
fn filter_args(accepted: usize, current: Value, extra: &[Value]) -> Vec<Value> {
    if accepted == 0 {
        return Vec::new();
    }
    let take = (accepted - 1).min(extra.len());
    let mut args = Vec::with_capacity(take + 1);
    args.push(current);
    args.extend_from_slice(&extra[..take]);
    args
}

fn invoke(
    hook: &str,
    registration: &CallbackRegistration,
    args: Vec<Value>,
) -> Result<Value, HookError> {
    registration.invoke(args).inspect_err(|e| {
        warn!(
            hook = %hook,
            label = registration.label(),
            owner = registration.owner().unwrap_or("-"),
            priority = registration.priority(),
            error = %e,
            "Hook callback failed, aborting dispatch"
        );
    })
}
