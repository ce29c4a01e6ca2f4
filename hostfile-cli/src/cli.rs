//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// `hostfile` command-line interface for normalizing host inventory files
#[derive(Parser)]
#[command(name = "hostfile-cli")]
#[command(author, version, about = "Host inventory normalization tool")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration directory, or a TOML import configuration file
    #[arg(short, long, global = true, env = "HOSTFILE_CONFIG_DIR")]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Import an inventory file
    #[command(about = "Normalize an inventory file into host records")]
    Import {
        #[command(flatten)]
        args: ImportArgs,

        /// Output format for the host records
        #[arg(short, long, default_value = "table", value_enum)]
        output: OutputFormat,
    },

    /// Validate an inventory file
    #[command(about = "Check every record of an inventory file and list failures")]
    Validate {
        #[command(flatten)]
        args: ImportArgs,
    },

    /// Manage the import configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by `import` and `validate`; each one overrides the
/// configuration file
#[allow(clippy::struct_excessive_bools)] // independent flags
#[derive(Args, Debug, Default)]
pub struct ImportArgs {
    /// Input file path
    pub file: PathBuf,

    /// Input format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Continue past failing records and report them at the end
    #[arg(long)]
    pub best_effort: bool,

    /// Field delimiter for delimited text
    #[arg(short, long)]
    pub delimiter: Option<char>,

    /// What to do with a hostname that appears twice
    #[arg(long, value_enum)]
    pub duplicates: Option<DuplicatesArg>,

    /// Only keep hosts whose name matches this regex (repeatable)
    #[arg(long = "filter", value_name = "REGEX")]
    pub filters: Vec<String>,

    /// Lowercase field names and values before classification
    #[arg(long)]
    pub lowercase: bool,

    /// Replace umlauts, parentheses, and commas in field values
    #[arg(long)]
    pub sanitize: bool,

    /// Normalize hostnames to lowercase with underscores
    #[arg(long)]
    pub normalize_hostnames: bool,
}

/// Import configuration subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective import configuration
    #[command(about = "Print the effective import configuration as TOML")]
    Show,

    /// Write a default import configuration
    #[command(about = "Write the default import configuration file")]
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

/// Output format for the import command
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Display as formatted table
    Table,
    /// Output as JSON
    Json,
}

/// Input format options
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    /// Delimited text with a header row (CSV)
    Delimited,
    /// JSON array of flat objects
    Structured,
    /// Vendor state export with `hostAddress` elements
    VendorState,
}

/// Duplicate hostname policy options
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DuplicatesArg {
    /// Fail the record
    Reject,
    /// Fold the later record into the first one
    Merge,
    /// Replace the first record
    LastWriteWins,
    /// Discard the later record
    KeepFirst,
}
