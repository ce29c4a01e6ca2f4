//! Import configuration commands.

use std::path::Path;

use hostfile_core::config::{ImportConfiguration, save_config};

use crate::cli::ConfigCommands;
use crate::error::CliError;
use crate::util::{import_config_path, load_import_config};

/// Config command handler
pub fn cmd_config(config_path: Option<&Path>, subcmd: ConfigCommands) -> Result<(), CliError> {
    match subcmd {
        ConfigCommands::Show => cmd_show(config_path),
        ConfigCommands::Init { force } => cmd_init(config_path, force),
    }
}

fn cmd_show(config_path: Option<&Path>) -> Result<(), CliError> {
    let config = load_import_config(config_path)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

fn cmd_init(config_path: Option<&Path>, force: bool) -> Result<(), CliError> {
    let path = import_config_path(config_path)?;
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    save_config(&path, &ImportConfiguration::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}
