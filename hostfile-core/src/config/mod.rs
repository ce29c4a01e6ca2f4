//! Configuration management for `hostfile`
//!
//! [`ImportConfiguration`] holds the options of one import run and
//! [`ConfigManager`] loads and saves it as TOML.

mod manager;
pub mod settings;

pub use manager::{ConfigManager, IMPORT_CONFIG_FILE, load_config, save_config};
pub use settings::{FileFormat, ImportConfiguration};
