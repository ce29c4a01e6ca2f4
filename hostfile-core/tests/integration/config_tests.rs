//! Integration tests for configuration persistence

use hostfile_core::config::{ConfigManager, FileFormat, ImportConfiguration, load_config, save_config};
use hostfile_core::error::ConfigError;
use hostfile_core::import::{DuplicateHostPolicy, ImportPipeline};
use tempfile::TempDir;

#[test]
fn test_configuration_file_drives_pipeline() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("import.toml");
    std::fs::write(
        &path,
        r#"
format = "structured"
tag_prefix = "t:"
label_prefix = "l:"
address_field_names = ["mgmt"]
host_filters = ["prod-"]
"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    let result = ImportPipeline::new(config)
        .unwrap()
        .run(br#"[{"name":"prod-db","mgmt":"10.0.0.1","t:env":"prod","l:os":"linux"},{"name":"dev-db"}]"#)
        .unwrap();

    assert_eq!(result.hosts.len(), 1);
    let host = &result.hosts[0];
    assert_eq!(host.addresses(), ["10.0.0.1"]);
    assert_eq!(host.tags()["env"], "prod");
    assert_eq!(host.labels()["os"], "linux");
}

#[test]
fn test_manager_round_trip() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_config_dir(dir.path());
    let config = ImportConfiguration::for_format(FileFormat::VendorState)
        .with_duplicate_hosts(DuplicateHostPolicy::LastWriteWins)
        .with_host_filter("^esx");

    manager.save_import_config(&config).unwrap();
    let text = std::fs::read_to_string(manager.config_path()).unwrap();
    assert!(text.contains("format = \"vendor_state\""));
    assert!(text.contains("duplicate_hosts = \"last_write_wins\""));

    assert_eq!(manager.load_import_config().unwrap(), config);
}

#[test]
fn test_legacy_format_names_accepted() {
    let config = ImportConfiguration::from_toml_str("format = \"bvq\"\nduplicate_hosts = \"keepFirst\"").unwrap();
    assert_eq!(config.format, FileFormat::VendorState);
    assert_eq!(config.duplicate_hosts, DuplicateHostPolicy::KeepFirst);
}

#[test]
fn test_invalid_filter_rejected_by_pipeline() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    save_config(&path, &ImportConfiguration::default().with_host_filter("[unclosed")).unwrap();

    let config = load_config(&path).unwrap();
    let err = ImportPipeline::new(config).unwrap_err();
    assert!(err.to_string().contains("invalid host filter '[unclosed'"));
    assert!(matches!(config_error(err), Some(ConfigError::HostFilter { .. })));
}

fn config_error(err: hostfile_core::ImportError) -> Option<ConfigError> {
    match err {
        hostfile_core::ImportError::Config(e) => Some(e),
        _ => None,
    }
}
