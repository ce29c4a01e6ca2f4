//! Integration tests for the format readers
//!
//! These tests feed realistic inventory exports to each reader and check
//! the raw records they produce.

use hostfile_core::error::FormatError;
use hostfile_core::import::{DelimitedReader, FormatReader, StructuredReader, VendorStateReader};
use hostfile_core::models::RawRecord;

fn collect(reader: &dyn FormatReader, input: &str) -> Vec<RawRecord> {
    reader
        .read(input.as_bytes())
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

// ============================================================================
// Delimited text
// ============================================================================

#[test]
fn test_delimited_export_with_quoted_fields() {
    let input = "\
Hostname,Standort,Beschreibung,ip
ABC001,DARZ,\"Rechenzentrum, Halle 2\",10.10.0.1
ABC002,FRA,\"Line one
line two\",10.10.0.2
";
    let records = collect(&DelimitedReader::default(), input);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("Beschreibung"), Some("Rechenzentrum, Halle 2"));
    assert_eq!(records[1].get("Beschreibung"), Some("Line one\nline two"));
    assert_eq!(records[1].line(), Some(3));
}

#[test]
fn test_delimited_headers_are_trimmed() {
    let records = collect(&DelimitedReader::default(), "host , tag_env\nsrv1, prod\n");
    assert_eq!(records[0].field_names(), ["host", "tag_env"]);
    assert_eq!(records[0].get("tag_env"), Some(" prod"));
}

#[test]
fn test_delimited_tab_separated() {
    let records = collect(&DelimitedReader::new(b'\t'), "host\tip\nsrv1\t10.0.0.1\n");
    assert_eq!(records[0].get("ip"), Some("10.0.0.1"));
}

#[test]
fn test_delimited_long_row_reports_row_and_line() {
    let reader = DelimitedReader::default();
    let outcomes: Vec<_> = reader.read(b"a,b\n1,2\n3,4,5\n").unwrap().collect();

    assert_eq!(
        outcomes[1],
        Err(FormatError::ColumnCount {
            row: 2,
            line: 3,
            expected: 2,
            found: 3,
        })
    );
}

#[test]
fn test_delimited_header_only() {
    let records = collect(&DelimitedReader::default(), "host,ip\n");
    assert!(records.is_empty());
}

// ============================================================================
// Structured arrays
// ============================================================================

#[test]
fn test_structured_inventory() {
    let input = r#"[
        {"hostname": "web01", "ipaddress": "192.168.1.10", "label_os": "linux", "rack": 12},
        {"hostname": "web02", "ipaddress": "192.168.1.11", "label_os": "linux", "rack": null}
    ]"#;
    let records = collect(&StructuredReader::new(), input);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("rack"), Some("12"));
    assert_eq!(records[1].get("rack"), None);
    assert_eq!(records[1].len(), 3);
}

#[test]
fn test_structured_empty_array() {
    assert!(collect(&StructuredReader::new(), "[]").is_empty());
}

#[test]
fn test_structured_invalid_encoding() {
    let err = StructuredReader::new().read(b"[{\"host\":\"\xC3\x28\"}]").err();
    assert_eq!(err, Some(FormatError::InvalidEncoding { offset: 10 }));
}

// ============================================================================
// Vendor state
// ============================================================================

#[test]
fn test_vendor_state_skips_other_objects() {
    let input = r#"[
        {"hostAddress": {"name": "esx01", "tag": "VMWARE_HOST", "ipv4": "10.1.0.1", "ipv6": "fd00::1"}},
        {"volume": {"name": "vol1"}},
        {"hostAddress": {"name": "san01", "tag": "SVC"}}
    ]"#;
    let records = collect(&VendorStateReader::default(), input);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].field_names(), ["name", "label_bvq_type", "ipv4", "ipv6"]);
    assert_eq!(records[1].field_names(), ["name", "label_bvq_type"]);
}

#[test]
fn test_vendor_state_is_not_positional() {
    assert!(!VendorStateReader::default().hostname_is_positional());
    assert!(!StructuredReader::new().hostname_is_positional());
}
