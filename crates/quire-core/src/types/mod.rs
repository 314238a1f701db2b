//! Core type definitions used across the Quire workspace.

pub mod entry;
pub mod id;

pub use entry::{EntrySnapshot, EntryTypeDescriptor};
pub use id::EntryId;
