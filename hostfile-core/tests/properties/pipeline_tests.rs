//! Property tests for the import pipeline

use hostfile_core::config::{FileFormat, ImportConfiguration};
use hostfile_core::import::ImportPipeline;
use proptest::prelude::*;

fn header() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,10}"
}

fn cell() -> impl Strategy<Value = String> {
    "[A-Za-z0-9.-]{1,12}"
}

/// A delimited document: header plus rows with unique first-column values
fn delimited_document() -> impl Strategy<Value = (Vec<String>, Vec<Vec<String>>)> {
    (1usize..6).prop_flat_map(|columns| {
        (
            prop::collection::vec(header(), columns),
            prop::collection::btree_set(cell(), 1..8),
            prop::collection::vec(prop::collection::vec(cell(), columns), 8),
        )
            .prop_map(|(headers, hostnames, cells)| {
                let rows = hostnames
                    .into_iter()
                    .zip(cells)
                    .map(|(hostname, mut row)| {
                        row[0] = hostname;
                        row
                    })
                    .collect();
                (headers, rows)
            })
    })
}

fn render(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut out = headers.join(",");
    out.push('\n');
    for row in rows {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

proptest! {
    /// Property: the first column is the hostname whatever its header says
    #[test]
    fn first_column_is_hostname((headers, rows) in delimited_document()) {
        let input = render(&headers, &rows);
        let result = ImportPipeline::new(ImportConfiguration::default())
            .unwrap()
            .run(input.as_bytes())
            .unwrap();

        let hostnames: Vec<&str> = result.hosts.iter().map(|h| h.hostname()).collect();
        let expected: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
        prop_assert_eq!(hostnames, expected);
    }

    /// Property: two runs over the same bytes give the same hosts
    #[test]
    fn runs_are_idempotent((headers, rows) in delimited_document()) {
        let input = render(&headers, &rows);
        let pipeline = ImportPipeline::new(ImportConfiguration::default()).unwrap();

        let first = pipeline.run(input.as_bytes()).unwrap().hosts;
        let second = pipeline.run(input.as_bytes()).unwrap().hosts;
        prop_assert_eq!(first, second);
    }

    /// Property: arbitrary bytes never panic the structured reader
    #[test]
    fn structured_input_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let config = ImportConfiguration::for_format(FileFormat::Structured).with_halt_on_error(false);
        let _ = ImportPipeline::new(config).unwrap().run(&bytes);
    }

    /// Property: best-effort runs account for every record
    #[test]
    fn best_effort_accounts_for_every_record(
        names in prop::collection::vec(prop::option::of("[a-z]{1,8}"), 1..10),
    ) {
        let objects: Vec<String> = names
            .iter()
            .enumerate()
            .map(|(i, name)| match name {
                Some(name) => format!(r#"{{"host":"{name}{i}"}}"#),
                None => r#"{"role":"unknown"}"#.to_string(),
            })
            .collect();
        let input = format!("[{}]", objects.join(","));

        let config = ImportConfiguration::for_format(FileFormat::Structured).with_halt_on_error(false);
        let result = ImportPipeline::new(config).unwrap().run(input.as_bytes()).unwrap();

        let missing = names.iter().filter(|n| n.is_none()).count();
        prop_assert_eq!(result.errors.len(), missing);
        prop_assert_eq!(result.hosts.len(), names.len() - missing);
        prop_assert_eq!(result.statistics.records_read, names.len());
    }
}
