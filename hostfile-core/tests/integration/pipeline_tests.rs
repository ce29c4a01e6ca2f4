//! End-to-end pipeline tests
//!
//! Covers the reference inventory scenarios, duplicate hostname policies,
//! and file-based runs.

use std::io::Write;

use hostfile_core::config::{FileFormat, ImportConfiguration};
use hostfile_core::error::{ClassificationError, FormatError, ImportError};
use hostfile_core::import::{DuplicateHostPolicy, ImportPipeline};
use hostfile_core::models::CanonicalHostRecord;
use tempfile::NamedTempFile;

fn run(config: ImportConfiguration, input: &str) -> Result<Vec<CanonicalHostRecord>, ImportError> {
    ImportPipeline::new(config)?
        .run(input.as_bytes())
        .map(|result| result.hosts)
}

fn hostnames(hosts: &[CanonicalHostRecord]) -> Vec<&str> {
    hosts.iter().map(CanonicalHostRecord::hostname).collect()
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn test_delimited_inventory_becomes_tags() {
    let hosts = run(
        ImportConfiguration::default(),
        "HOSTNAME,STANDORT,STADT,IDENT\nABC001,DARZ,Darmstadt,NET\n",
    )
    .unwrap();

    let expected = CanonicalHostRecord::new("ABC001")
        .with_tag("STANDORT", "DARZ")
        .with_tag("STADT", "Darmstadt")
        .with_tag("IDENT", "NET");
    assert_eq!(hosts, [expected]);
    assert!(hosts[0].addresses().is_empty());
}

#[test]
fn test_delimited_address_first_column_stays_an_address() {
    let hosts = run(ImportConfiguration::default(), "ip,host\n10.0.0.1,srv\n").unwrap();

    let expected = CanonicalHostRecord::new("10.0.0.1")
        .with_address("10.0.0.1")
        .with_tag("host", "srv");
    assert_eq!(hosts, [expected]);
}

#[test]
fn test_delimited_trailing_delimiter_adds_no_empty_tag() {
    let hosts = run(
        ImportConfiguration::default(),
        "HOSTNAME,STADT,\nABC001,Darmstadt,\n",
    )
    .unwrap();

    assert_eq!(hosts, [CanonicalHostRecord::new("ABC001").with_tag("STADT", "Darmstadt")]);
}

#[test]
fn test_structured_object_with_address_and_tag() {
    let hosts = run(
        ImportConfiguration::for_format(FileFormat::Structured),
        r#"[{"host":"srv1","ip":"10.0.0.5","tag_env":"prod"}]"#,
    )
    .unwrap();

    let expected = CanonicalHostRecord::new("srv1")
        .with_address("10.0.0.5")
        .with_tag("env", "prod");
    assert_eq!(hosts, [expected]);
}

#[test]
fn test_structured_object_without_hostname_fails() {
    let err = run(
        ImportConfiguration::for_format(FileFormat::Structured),
        r#"[{"role":"db","tag_env":"prod"}]"#,
    )
    .unwrap_err();

    match err {
        ImportError::Classification(ClassificationError::MissingHostname { position, fields }) => {
            assert_eq!(position, 1);
            assert_eq!(fields, ["role", "tag_env"]);
        }
        other => panic!("expected missing hostname, got {other:?}"),
    }
}

#[test]
fn test_duplicate_header_second_value_wins() {
    let hosts = run(
        ImportConfiguration::default(),
        "HOSTNAME,IDENT,IDENT\nABC001,NET,LAN\n",
    )
    .unwrap();
    assert_eq!(hosts[0].tags()["IDENT"], "LAN");
}

#[test]
fn test_best_effort_reports_bad_row_between_good_ones() {
    let config = ImportConfiguration::default().with_halt_on_error(false);
    let result = ImportPipeline::new(config)
        .unwrap()
        .run(b"host,site\nsrv1,fra\nsrv2\nsrv3,ber\n")
        .unwrap();

    assert_eq!(hostnames(&result.hosts), ["srv1", "srv3"]);
    assert_eq!(result.errors.len(), 1);
    assert!(matches!(
        result.errors[0],
        ImportError::Format(FormatError::ColumnCount {
            row: 2,
            expected: 2,
            found: 1,
            ..
        })
    ));
}

#[test]
fn test_vendor_export() {
    let export = r#"[
        {"hostAddress": {"name": "esx01", "tag": "VMWARE_HOST", "ipv4": "10.1.0.1"}},
        {"hostAddress": {"name": "esx02", "tag": "VMWARE_HOST", "ipv4": "10.1.0.2"}},
        {"storagePool": {"name": "pool0", "capacity": 1024}}
    ]"#;
    let hosts = run(ImportConfiguration::for_format(FileFormat::VendorState), export).unwrap();

    assert_eq!(hostnames(&hosts), ["esx01", "esx02"]);
    assert_eq!(hosts[0].labels()["bvq_type"], "VMWARE_HOST");
    assert_eq!(hosts[0].addresses(), ["10.1.0.1"]);
    assert!(hosts[0].tags().is_empty());
}

// ============================================================================
// Duplicate hostnames
// ============================================================================

const DUPLICATES: &str = "host,ip,tag_env\nsrv1,10.0.0.1,test\nsrv2,10.0.0.2,test\nsrv1,10.0.0.3,prod\n";

fn with_policy(policy: DuplicateHostPolicy) -> ImportConfiguration {
    ImportConfiguration::default().with_duplicate_hosts(policy)
}

#[test]
fn test_duplicates_rejected_by_default() {
    let err = run(ImportConfiguration::default(), DUPLICATES).unwrap_err();
    match err {
        ImportError::DuplicateHostname {
            hostname,
            position,
            first_position,
        } => {
            assert_eq!(hostname, "srv1");
            assert_eq!(position, 3);
            assert_eq!(first_position, 1);
        }
        other => panic!("expected duplicate hostname, got {other:?}"),
    }
}

#[test]
fn test_duplicates_rejected_in_best_effort_mode() {
    let config = with_policy(DuplicateHostPolicy::Reject).with_halt_on_error(false);
    let result = ImportPipeline::new(config)
        .unwrap()
        .run(DUPLICATES.as_bytes())
        .unwrap();

    assert_eq!(hostnames(&result.hosts), ["srv1", "srv2"]);
    assert_eq!(result.hosts[0].tags()["env"], "test");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.statistics.duplicates, 1);
}

#[test]
fn test_duplicates_merged() {
    let hosts = run(with_policy(DuplicateHostPolicy::Merge), DUPLICATES).unwrap();
    assert_eq!(hostnames(&hosts), ["srv1", "srv2"]);
    assert_eq!(hosts[0].addresses(), ["10.0.0.1", "10.0.0.3"]);
    assert_eq!(hosts[0].tags()["env"], "prod");
}

#[test]
fn test_duplicates_last_write_wins() {
    let hosts = run(with_policy(DuplicateHostPolicy::LastWriteWins), DUPLICATES).unwrap();
    assert_eq!(hostnames(&hosts), ["srv1", "srv2"]);
    assert_eq!(hosts[0].addresses(), ["10.0.0.3"]);
}

#[test]
fn test_duplicates_keep_first() {
    let result = ImportPipeline::new(with_policy(DuplicateHostPolicy::KeepFirst))
        .unwrap()
        .run(DUPLICATES.as_bytes())
        .unwrap();

    assert_eq!(result.hosts[0].addresses(), ["10.0.0.1"]);
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].identifier, "srv1");
    assert_eq!(result.statistics.duplicates, 1);
    assert!(result.errors.is_empty());
}

// ============================================================================
// Supplementary options
// ============================================================================

#[test]
fn test_multi_value_and_attributes() {
    let config = ImportConfiguration::for_format(FileFormat::Structured);
    let hosts = run(
        config,
        r#"[{"name":"srv1","label_roles:sep(,)":"db,web","attr_site":"fra","attr_meta_data":"x"}]"#,
    )
    .unwrap();

    assert_eq!(hosts[0].labels()["roles/db"], "true");
    assert_eq!(hosts[0].labels()["roles/web"], "true");
    assert_eq!(hosts[0].attributes().len(), 1);
    assert_eq!(hosts[0].attributes()["site"], "fra");
}

#[test]
fn test_semicolon_delimited_with_normalized_hostnames() {
    let config = ImportConfiguration::default()
        .with_delimiter(';')
        .with_normalize_hostnames(true);
    let hosts = run(config, "Name;ip\nWeb Server 01;10.0.0.5, 10.0.0.6\n").unwrap();

    assert_eq!(hosts[0].hostname(), "web_server_01");
    assert_eq!(hosts[0].primary_address(), Some("10.0.0.5"));
}

#[test]
fn test_statistics_report() {
    let config = ImportConfiguration::for_format(FileFormat::Structured)
        .with_halt_on_error(false)
        .with_host_filter("srv");
    let result = ImportPipeline::new(config)
        .unwrap()
        .run(br#"[{"host":"srv1"},{"ip":"10.0.0.2"},{"role":"x"},{"host":"db1"}]"#)
        .unwrap();

    let stats = &result.statistics;
    assert_eq!(stats.records_read, 4);
    assert_eq!(stats.imported, 1);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.filtered, 2);
    assert_eq!(stats.address_fallbacks, 1);
    assert!(stats.detailed_report().contains("Hostname from address: 1"));
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn test_run_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"\xEF\xBB\xBFhostname,tag_env\nsrv1,prod\n").unwrap();

    let result = ImportPipeline::new(ImportConfiguration::default())
        .unwrap()
        .run_file(file.path())
        .unwrap();

    assert_eq!(result.hosts[0].hostname(), "srv1");
    assert_eq!(result.hosts[0].tags()["env"], "prod");
}

#[test]
fn test_run_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");

    let err = ImportPipeline::new(ImportConfiguration::default())
        .unwrap()
        .run_file(&path)
        .unwrap_err();

    match err {
        ImportError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected I/O error, got {other:?}"),
    }
}

#[test]
fn test_runs_are_idempotent_across_threads() {
    let pipeline = ImportPipeline::new(ImportConfiguration::default()).unwrap();
    let input = b"host,ip,label_os\nsrv1,10.0.0.1,linux\nsrv2,10.0.0.2,bsd\n";

    let (first, second) = std::thread::scope(|scope| {
        let a = scope.spawn(|| pipeline.run(input).unwrap().hosts);
        let b = scope.spawn(|| pipeline.run(input).unwrap().hosts);
        (a.join().unwrap(), b.join().unwrap())
    });

    assert_eq!(first, second);
}
