//! Raw record model.

/// One row or object as produced by a format reader.
///
/// Fields keep the order of the source; duplicate names are allowed and
/// resolved later by the record builder. A record is never modified after a
/// reader produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    position: usize,
    line: Option<u64>,
    fields: Vec<(String, String)>,
}

impl RawRecord {
    /// Creates a record at the given 1-based position
    #[must_use]
    pub fn new(position: usize, fields: Vec<(String, String)>) -> Self {
        Self {
            position,
            line: None,
            fields,
        }
    }

    /// Creates a record from borrowed name/value pairs
    #[must_use]
    pub fn from_pairs<'a>(
        position: usize,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        Self::new(
            position,
            pairs
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        )
    }

    /// Sets the source line the record starts on
    #[must_use]
    pub const fn with_line(mut self, line: u64) -> Self {
        self.line = Some(line);
        self
    }

    /// 1-based position of the record within its input
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Source line the record starts on, if the format tracks lines
    pub const fn line(&self) -> Option<u64> {
        self.line
    }

    /// Fields in source order
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Iterates over `(name, value)` pairs in source order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Field names in source order
    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Returns the value of the first field with exactly this name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
