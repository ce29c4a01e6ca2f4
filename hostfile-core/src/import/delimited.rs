//! Delimited text reader.
//!
//! The first line is the header. The first column always carries the
//! hostname, whatever its header says. Rows keep header order, duplicate
//! header names included.

use csv::{ReaderBuilder, StringRecord, Trim};

use super::traits::{FormatReader, RawRecords, decode_utf8};
use crate::error::FormatError;
use crate::models::RawRecord;

/// Reader for comma (or otherwise) separated values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedReader {
    delimiter: u8,
}

impl Default for DelimitedReader {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl DelimitedReader {
    /// Creates a reader for the given single-byte delimiter
    #[must_use]
    pub const fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// The column delimiter
    #[must_use]
    pub const fn delimiter(&self) -> u8 {
        self.delimiter
    }
}

fn csv_error(err: &csv::Error) -> FormatError {
    FormatError::Delimited {
        line: err.position().map(csv::Position::line),
        reason: err.to_string(),
    }
}

fn to_raw_record(
    names: &[String],
    row: &StringRecord,
    index: usize,
) -> Result<RawRecord, FormatError> {
    let position = index + 1;
    let line = row.position().map_or(0, csv::Position::line);

    if row.len() != names.len() {
        return Err(FormatError::ColumnCount {
            row: position,
            line,
            expected: names.len(),
            found: row.len(),
        });
    }

    let fields = names
        .iter()
        .cloned()
        .zip(row.iter().map(String::from))
        .collect();
    Ok(RawRecord::new(position, fields).with_line(line))
}

impl FormatReader for DelimitedReader {
    fn source_id(&self) -> &'static str {
        "delimited"
    }

    fn display_name(&self) -> &'static str {
        "Delimited text"
    }

    fn hostname_is_positional(&self) -> bool {
        true
    }

    fn read<'a>(&self, content: &'a [u8]) -> Result<RawRecords<'a>, FormatError> {
        let text = decode_utf8(content)?;

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(text.as_bytes());

        let headers = reader.headers().map_err(|e| csv_error(&e))?;
        if headers.iter().all(str::is_empty) {
            return Err(FormatError::MissingHeader);
        }
        let names: Vec<String> = headers.iter().map(String::from).collect();
        tracing::trace!(columns = names.len(), "Read header row");

        Ok(Box::new(reader.into_records().enumerate().map(
            move |(index, row)| {
                let row = row.map_err(|e| csv_error(&e))?;
                to_raw_record(&names, &row, index)
            },
        )))
    }
}
