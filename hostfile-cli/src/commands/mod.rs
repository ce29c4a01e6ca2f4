//! Command handler modules for the CLI.

mod completions;
mod config;
mod import;

use std::path::Path;

use crate::cli::Commands;
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(config_path: Option<&Path>, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Import { args, output } => import::cmd_import(config_path, &args, output),
        Commands::Validate { args } => import::cmd_validate(config_path, &args),
        Commands::Config(subcmd) => config::cmd_config(config_path, subcmd),
        Commands::Completions { shell } => completions::cmd_completions(shell),
    }
}
