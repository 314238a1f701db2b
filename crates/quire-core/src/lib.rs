//! # quire-core
//!
//! Core crate for Quire. Contains configuration schemas, the entry
//! snapshot handed to entry hooks, typed identifiers, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other Quire crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
