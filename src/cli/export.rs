//! Export command: prints the bundled tree data as one JSON document.

use crate::cli::common::{print_json, CliResult};
use crate::config::Config;
use clap::Args;

/// Print positions and descriptions as JSON
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Single-line output, overriding the configured pretty printing
    #[arg(long)]
    pub compact: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        let data = super::tree_data()?;
        print_json(data, config.output.pretty && !self.compact)
    }
}
