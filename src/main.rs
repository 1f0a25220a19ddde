//! Passive Tree - inspect the bundled skill tree node data
//!
//! Prints summaries, node lookups, tooltip searches and a full JSON export
//! of the positions and descriptions documents.

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use passive_tree::cli::{
    CliError, CliResult, ConfigArgs, ExportArgs, NodeArgs, SearchArgs, SummaryArgs,
};
use passive_tree::config::Config;
use passive_tree::constants::APP_NAME;

/// Passive Tree - bundled skill tree node positions and tooltips
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show node counts
    Summary(SummaryArgs),
    /// Show one node's position and tooltip
    Node(NodeArgs),
    /// Search tooltips by name or stat text
    Search(SearchArgs),
    /// Print all tree data as JSON
    Export(ExportArgs),
    /// Manage the configuration file
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Summary(args) => args.execute(),
        Command::Node(args) => args.execute(),
        Command::Search(args) => args.execute(),
        Command::Export(args) => {
            let config = Config::load().map_err(|e| {
                CliError::validation(format!("Failed to load configuration: {e:#}"))
            })?;
            args.execute(&config)
        }
        Command::Config(args) => args.execute(),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(err.code.code());
    }
}
