//! # quire
//!
//! Host side of the Quire hook system: bootstraps the compiled-in plugins,
//! routes entry saves through the entry hooks, and exposes both through a
//! command-line interface.

pub mod app;
pub mod commands;
pub mod entries;
pub mod output;
