//! BVQ state export reader.
//!
//! The export is a JSON array of heterogeneous elements. Only elements that
//! carry a `hostAddress` object describe hosts; everything else is ignored.
//! Record positions are element positions in the array, so they can have
//! gaps.

use serde_json::{Map, Value};

use super::structured::{parse_array, value_kind, value_text};
use super::traits::{FormatReader, RawRecords};
use crate::error::FormatError;
use crate::models::RawRecord;

const FORMAT_NAME: &str = "BVQ";
const HOST_ADDRESS_KEY: &str = "hostAddress";

/// Reader for BVQ state exports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorStateReader {
    type_label: String,
}

impl Default for VendorStateReader {
    fn default() -> Self {
        Self::new("label_")
    }
}

impl VendorStateReader {
    /// Creates a reader that emits the BVQ object type as a label field
    /// using `label_prefix`
    #[must_use]
    pub fn new(label_prefix: &str) -> Self {
        Self {
            type_label: format!("{label_prefix}bvq_type"),
        }
    }

    fn host_fields(&self, address: &Map<String, Value>) -> Vec<(String, String)> {
        [
            ("name", "name"),
            ("tag", self.type_label.as_str()),
            ("ipv4", "ipv4"),
            ("ipv6", "ipv6"),
        ]
        .into_iter()
        .filter_map(|(source, target)| {
            address
                .get(source)
                .and_then(value_text)
                .map(|value| (target.to_string(), value))
        })
        .collect()
    }

    fn to_raw_record(&self, index: usize, item: &Value) -> Option<Result<RawRecord, FormatError>> {
        let position = index + 1;
        match item.get(HOST_ADDRESS_KEY)? {
            Value::Object(address) => {
                Some(Ok(RawRecord::new(position, self.host_fields(address))))
            }
            other => Some(Err(FormatError::UnexpectedElement {
                format: FORMAT_NAME,
                position,
                found: value_kind(other),
            })),
        }
    }
}

impl FormatReader for VendorStateReader {
    fn source_id(&self) -> &'static str {
        "vendor_state"
    }

    fn display_name(&self) -> &'static str {
        "BVQ state export"
    }

    fn read<'a>(&self, content: &'a [u8]) -> Result<RawRecords<'a>, FormatError> {
        let items = parse_array(content, FORMAT_NAME)?;
        tracing::trace!(elements = items.len(), "Parsed BVQ export");

        let reader = self.clone();
        Ok(Box::new(
            items
                .into_iter()
                .enumerate()
                .filter_map(move |(index, item)| reader.to_raw_record(index, &item)),
        ))
    }
}
