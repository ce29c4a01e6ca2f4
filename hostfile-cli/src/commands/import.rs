//! Import and validate commands.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use hostfile_core::config::ImportConfiguration;
use hostfile_core::import::{ImportPipeline, ImportResult};
use hostfile_core::models::CanonicalHostRecord;

use crate::cli::{ImportArgs, OutputFormat};
use crate::error::CliError;
use crate::util::{apply_overrides, load_import_config};

fn load_config(config_path: Option<&Path>, args: &ImportArgs) -> Result<ImportConfiguration, CliError> {
    Ok(apply_overrides(load_import_config(config_path)?, args))
}

/// Import command handler
pub fn cmd_import(
    config_path: Option<&Path>,
    args: &ImportArgs,
    output: OutputFormat,
) -> Result<(), CliError> {
    let pipeline = ImportPipeline::new(load_config(config_path, args)?)?;
    let result = pipeline.run_file(&args.file)?;

    match output {
        OutputFormat::Table => println!("{}", format_table(&result.hosts)),
        OutputFormat::Json => println!("{}", format_json(&result.hosts)?),
    }

    print_problems(&result);
    eprintln!("{}", result.summary());
    Ok(())
}

/// Validate command handler.
///
/// Always runs in best-effort mode so every failing record is reported.
pub fn cmd_validate(config_path: Option<&Path>, args: &ImportArgs) -> Result<(), CliError> {
    let config = load_config(config_path, args)?.with_halt_on_error(false);
    let pipeline = ImportPipeline::new(config)?;
    let result = pipeline.run_file(&args.file)?;

    print_problems(&result);
    println!("{}", result.statistics.detailed_report().trim_end());

    if result.has_errors() {
        return Err(CliError::InvalidData(format!(
            "{} of {} records failed",
            result.errors.len(),
            result.statistics.records_read
        )));
    }

    println!("{} is valid", args.file.display());
    Ok(())
}

fn print_problems(result: &ImportResult) {
    for error in &result.errors {
        eprintln!("  error: {error}");
    }
    for entry in &result.skipped {
        eprintln!("  skipped {}: {}", entry.identifier, entry.reason);
    }
}

fn format_pairs(map: &BTreeMap<String, String>) -> String {
    map.iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Format host records as a table string
#[must_use]
pub fn format_table(hosts: &[CanonicalHostRecord]) -> String {
    if hosts.is_empty() {
        return "No hosts found.".to_string();
    }

    let rows: Vec<[String; 4]> = hosts
        .iter()
        .map(|h| {
            [
                h.hostname().to_string(),
                h.primary_address().unwrap_or("-").to_string(),
                format_pairs(h.tags()),
                format_pairs(h.labels()),
            ]
        })
        .collect();

    let width = |col: usize, title: &str| {
        rows.iter()
            .map(|r| r[col].len())
            .max()
            .unwrap_or(0)
            .max(title.len())
    };
    let name_width = width(0, "HOSTNAME");
    let address_width = width(1, "ADDRESS");
    let tags_width = width(2, "TAGS");

    let mut output = String::new();

    let _ = writeln!(
        output,
        "{:<name_width$}  {:<address_width$}  {:<tags_width$}  LABELS",
        "HOSTNAME", "ADDRESS", "TAGS"
    );
    let _ = writeln!(
        output,
        "{:-<name_width$}  {:-<address_width$}  {:-<tags_width$}  ------",
        "", "", ""
    );

    for [name, address, tags, labels] in &rows {
        let _ = writeln!(
            output,
            "{name:<name_width$}  {address:<address_width$}  {tags:<tags_width$}  {labels}"
        );
    }

    output.lines().map(str::trim_end).collect::<Vec<_>>().join("\n")
}

/// Format host records as a JSON array
///
/// # Errors
///
/// Returns `CliError::Output` if JSON serialization fails.
pub fn format_json(hosts: &[CanonicalHostRecord]) -> Result<String, CliError> {
    serde_json::to_string_pretty(hosts)
        .map_err(|e| CliError::Output(format!("Failed to serialize to JSON: {e}")))
}
