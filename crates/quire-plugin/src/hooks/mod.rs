//! Hook system: registry, dispatcher, callbacks, and typed hook definitions.

pub mod callback;
pub mod definitions;
pub mod dispatcher;
pub mod registry;

pub use callback::HookCallback;
pub use definitions::{ActionHook, FilterHook, HookArgs, HookName};
pub use dispatcher::HookDispatcher;
pub use registry::{HookRegistry, RegisterOptions, RegistrationHandle};
