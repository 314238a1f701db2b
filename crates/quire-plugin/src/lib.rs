//! # quire-plugin
//!
//! Plugin framework for Quire. Provides:
//!
//! - Hook registry keeping callbacks ordered by priority, then registration
//! - Filter dispatch threading a value through every callback
//! - Action dispatch notifying every callback for side effects
//! - Typed hook descriptors for the documented extension points
//! - Plugin registry and bootstrap lifecycle

pub mod error;
pub mod hooks;
pub mod macros;
pub mod manager;
pub mod prelude;
pub mod registry;

pub use error::HookError;
pub use hooks::callback::HookCallback;
pub use hooks::definitions::{ActionHook, FilterHook, HookArgs, HookName, entries};
pub use hooks::dispatcher::HookDispatcher;
pub use hooks::registry::{
    CallbackInfo, CallbackRegistration, CallbackSnapshot, HookRegistry, RegisterOptions,
    RegistrationHandle,
};
pub use manager::PluginManager;
pub use registry::{Plugin, PluginHooks, PluginInfo, PluginRegistry};
