//! Integration tests across the hook registry, the plugin manager and the
//! entry save flow.

mod action_test;
mod entry_types_test;
mod filter_test;
mod helpers;
