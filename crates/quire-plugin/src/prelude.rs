//! Prelude for convenient imports in plugin crates.

pub use crate::error::HookError;
pub use crate::hooks::definitions::{ActionHook, FilterHook, HookArgs, HookName, entries};
pub use crate::hooks::dispatcher::HookDispatcher;
pub use crate::hooks::registry::{
    DEFAULT_ACCEPTED_ARGS, DEFAULT_PRIORITY, HookRegistry, RegisterOptions, RegistrationHandle,
};
pub use crate::registry::{Plugin, PluginHooks, PluginInfo};

pub use crate::plugin_info;
