//! `quire types`: lists content types after plugins have contributed.

use serde::Serialize;
use tabled::Tabled;

use quire_core::result::AppResult;
use quire_plugin::PluginManager;

use crate::entries;
use crate::output::{self, OutputFormat};

/// One row of the type listing.
#[derive(Debug, Serialize, Tabled)]
pub struct TypeRow {
    /// Type name
    #[tabled(rename = "Type")]
    pub name: String,
    /// Icon class
    #[tabled(rename = "Icon")]
    pub icon: String,
}

/// Execute the types command
pub fn execute(manager: &PluginManager, format: OutputFormat) -> AppResult<()> {
    let rows: Vec<TypeRow> = entries::registered_types(manager.dispatcher())?
        .into_iter()
        .map(|(name, descriptor)| TypeRow {
            name,
            icon: descriptor.icon.unwrap_or_default(),
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
