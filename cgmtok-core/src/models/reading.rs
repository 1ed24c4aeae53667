use std::fmt::{self, Display};

/// Cell contents treated as "no data", matching the markers common CSV producers emit.
pub const MISSING_VALUE_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "-NaN", "nan", "-nan", "null", "NULL", "None", "<NA>", "#N/A",
];

///
/// A single glucose reading as it came out of the source table.
///
/// Readings are not validated on the way in. A cell that cannot be read as a number is kept as
/// [`RawReading::Text`] so that the tokenizer can decide what to do with it.
///
#[derive(Debug, Clone, PartialEq)]
pub enum RawReading {
    Missing,
    Numeric(f64),
    Text(String),
}

impl RawReading {
    ///
    /// Classify a raw table cell.
    ///
    /// # Arguments
    /// - `cell`: the cell contents, untrimmed
    ///
    pub fn from_cell(cell: &str) -> Self {
        let trimmed = cell.trim();
        if MISSING_VALUE_MARKERS.contains(&trimmed) {
            return RawReading::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(value) => RawReading::from(value),
            Err(_) => RawReading::Text(cell.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, RawReading::Missing)
    }

    ///
    /// Interpret the reading as a float. Returns `None` for missing readings, text that does
    /// not parse, and `NaN`.
    ///
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            RawReading::Missing => return None,
            RawReading::Numeric(value) => *value,
            RawReading::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        if value.is_nan() { None } else { Some(value) }
    }
}

impl From<f64> for RawReading {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            RawReading::Missing
        } else {
            RawReading::Numeric(value)
        }
    }
}

impl From<f32> for RawReading {
    fn from(value: f32) -> Self {
        RawReading::from(value as f64)
    }
}

impl From<i64> for RawReading {
    fn from(value: i64) -> Self {
        RawReading::Numeric(value as f64)
    }
}

impl From<i32> for RawReading {
    fn from(value: i32) -> Self {
        RawReading::Numeric(value as f64)
    }
}

impl From<u32> for RawReading {
    fn from(value: u32) -> Self {
        RawReading::Numeric(value as f64)
    }
}

impl From<&str> for RawReading {
    fn from(value: &str) -> Self {
        RawReading::Text(value.to_string())
    }
}

impl From<String> for RawReading {
    fn from(value: String) -> Self {
        RawReading::Text(value)
    }
}

impl<T: Into<RawReading>> From<Option<T>> for RawReading {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawReading::Missing, Into::into)
    }
}

impl Display for RawReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawReading::Missing => write!(f, "<missing>"),
            RawReading::Numeric(value) => write!(f, "{}", value),
            RawReading::Text(text) => write!(f, "{:?}", text),
        }
    }
}
