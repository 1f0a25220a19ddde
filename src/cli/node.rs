//! Node lookup command.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::tree_data::{NodeCategory, NodePosition, TooltipContent};
use clap::Args;
use serde::Serialize;

/// Show the position and tooltip of a node
#[derive(Debug, Clone, Args)]
pub struct NodeArgs {
    /// Node identifier (e.g., "K1", "N12")
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct NodeResponse<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<NodeCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<&'a NodePosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tooltip: Option<&'a TooltipContent>,
}

impl NodeArgs {
    /// Execute the node command
    pub fn execute(&self) -> CliResult<()> {
        let data = super::tree_data()?;

        let position = data.position(&self.id);
        let tooltip = data.tooltip(&self.id);

        if position.is_none() && tooltip.is_none() {
            return Err(CliError::validation(format!("Unknown node: {}", self.id)));
        }

        let response = NodeResponse {
            id: &self.id,
            category: position.map(|(category, _)| category),
            position: position.map(|(_, position)| position),
            tooltip,
        };

        if self.json {
            print_json(&response, true)?;
            return Ok(());
        }

        println!("Node:     {}", response.id);
        if let Some((category, position)) = position {
            println!("Category: {}", category.label());
            println!("Position: ({}, {})", position.x, position.y);
        }
        if let Some(tooltip) = tooltip {
            println!("Name:     {}", tooltip.name);
            if tooltip.stats.is_empty() {
                println!("Stats:    (none)");
            } else {
                println!("Stats:");
                for stat in &tooltip.stats {
                    println!("  {stat}");
                }
            }
        }

        Ok(())
    }
}
