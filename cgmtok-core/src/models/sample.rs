use std::collections::HashMap;

use super::reading::RawReading;

///
/// One row of the raw input table: an identifier, the ordered glucose readings, and the
/// untouched contents of every label column keyed by its exact header text.
///
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSample {
    pub id: String,
    pub readings: Vec<RawReading>,
    pub labels: HashMap<String, String>,
}

impl RawSample {
    pub fn new(id: impl Into<String>, readings: Vec<RawReading>) -> Self {
        Self {
            id: id.into(),
            readings,
            labels: HashMap::new(),
        }
    }

    ///
    /// Attach a raw label cell. Column names are stored verbatim, whitespace included.
    ///
    pub fn with_label(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(column.into(), value.into());
        self
    }

    pub fn label(&self, column: &str) -> Option<&str> {
        self.labels.get(column).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.readings.iter().filter(|r| r.is_missing()).count()
    }
}
