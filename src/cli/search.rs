//! Tooltip search command.

use crate::cli::common::{print_json, CliResult};
use clap::Args;
use serde::Serialize;

/// Search node tooltips by name or stat text
#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Text to look for (case-insensitive)
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Maximum number of results (at least 1)
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct SearchItem<'a> {
    id: &'a str,
    name: &'a str,
    stats: &'a [String],
}

#[derive(Debug, Serialize)]
struct SearchResponse<'a> {
    query: &'a str,
    results: Vec<SearchItem<'a>>,
    count: usize,
}

impl SearchArgs {
    /// Execute the search command
    pub fn execute(&self) -> CliResult<()> {
        let data = super::tree_data()?;

        let results: Vec<SearchItem> = data
            .search(&self.query)
            .into_iter()
            .take(
                self.limit
                    .and_then(|limit| usize::try_from(limit).ok())
                    .unwrap_or(usize::MAX),
            )
            .map(|(id, tooltip)| SearchItem {
                id,
                name: &tooltip.name,
                stats: &tooltip.stats,
            })
            .collect();

        let response = SearchResponse {
            query: &self.query,
            count: results.len(),
            results,
        };

        if self.json {
            print_json(&response, true)?;
        } else if response.results.is_empty() {
            println!("No nodes match \"{}\"", self.query);
        } else {
            for item in &response.results {
                println!("{:<6} {}", item.id, item.name);
            }
            println!();
            println!("{} result(s)", response.count);
        }

        Ok(())
    }
}
