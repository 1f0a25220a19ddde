//! Summary command: counts of positioned and described nodes.

use crate::cli::common::{print_json, CliResult};
use clap::Args;
use serde::Serialize;

/// Show how many nodes the bundled documents contain
#[derive(Debug, Clone, Args)]
pub struct SummaryArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct SummaryResponse {
    keystones: usize,
    notables: usize,
    descriptions: usize,
    undescribed: Vec<String>,
}

impl SummaryArgs {
    /// Execute the summary command
    pub fn execute(&self) -> CliResult<()> {
        let data = super::tree_data()?;

        // Positioned nodes with no tooltip entry
        let undescribed = data
            .positions
            .keystones
            .iter()
            .chain(&data.positions.notables)
            .filter(|position| data.tooltip(&position.id).is_none())
            .map(|position| position.id.clone())
            .collect();

        let response = SummaryResponse {
            keystones: data.positions.keystones.len(),
            notables: data.positions.notables.len(),
            descriptions: data.description_count(),
            undescribed,
        };

        if self.json {
            print_json(&response, true)?;
        } else {
            println!("Keystones:    {}", response.keystones);
            println!("Notables:     {}", response.notables);
            println!("Descriptions: {}", response.descriptions);
            if !response.undescribed.is_empty() {
                println!("Undescribed:  {}", response.undescribed.join(", "));
            }
        }

        Ok(())
    }
}
