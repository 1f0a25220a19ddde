//! CLI command handlers for the passive tree tool.
//!
//! This module provides headless, scriptable access to the bundled tree data
//! for automation and for inspecting the documents.

pub mod common;
pub mod config;
pub mod export;
pub mod node;
pub mod search;
pub mod summary;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use export::ExportArgs;
pub use node::NodeArgs;
pub use search::SearchArgs;
pub use summary::SummaryArgs;

use crate::tree_data::{load_data, TreeData};

/// Loads the bundled tree data, mapping failures to an I/O error.
pub(crate) fn tree_data() -> CliResult<&'static TreeData> {
    load_data().map_err(|e| CliError::io(format!("Failed to load tree data: {e:#}")))
}
