//! Callback abstraction for hook registrations.

use serde_json::Value;

use crate::error::HookError;

/// A unit of plugin code invokable by the dispatcher.
///
/// `args` holds at most as many values as the registration declared it
/// accepts. For filters the first argument is the value being threaded and
/// the return value replaces it; for actions the return value is discarded.
pub trait HookCallback: Send + Sync {
    /// Invokes the callback.
    fn invoke(&self, args: Vec<Value>) -> Result<Value, HookError>;
}

impl<F> HookCallback for F
where
    F: Fn(Vec<Value>) -> Result<Value, HookError> + Send + Sync,
{
    fn invoke(&self, args: Vec<Value>) -> Result<Value, HookError> {
        self(args)
    }
}
