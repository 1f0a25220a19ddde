//! Configuration management commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::constants::APP_BINARY_NAME;
use clap::{Args, Subcommand};

/// Manage the configuration file
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show(ConfigShowArgs),
    /// Print the config file location
    Path,
    /// Write a config file with default values
    Init(ConfigInitArgs),
}

/// Show the effective configuration
#[derive(Debug, Clone, Args)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Write a config file with default values
#[derive(Debug, Clone, Args)]
pub struct ConfigInitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path()
                    .map_err(|e| CliError::io(format!("{e:#}")))?;
                println!("{}", path.display());
                Ok(())
            }
            ConfigCommand::Init(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            return print_json(&config, true);
        }

        let content = toml::to_string_pretty(&config)
            .map_err(|e| CliError::io(format!("Failed to serialize configuration: {e}")))?;
        print!("{content}");
        Ok(())
    }
}

impl ConfigInitArgs {
    /// Execute init command
    pub fn execute(&self) -> CliResult<()> {
        if Config::exists() && !self.force {
            return Err(CliError::validation(format!(
                "Config file already exists. Run `{APP_BINARY_NAME} config init --force` to overwrite it"
            )));
        }

        Config::new()
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        if let Ok(path) = Config::config_file_path() {
            println!("Wrote {}", path.display());
        }
        Ok(())
    }
}
