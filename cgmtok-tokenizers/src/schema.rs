//!
//! Label column schema shared by every producer and consumer of CGM tables.
//!
//! The multi-label column names are matched byte-for-byte. The macrovascular column carries a
//! trailing space in every table produced so far; it is part of the contract and must not be
//! "fixed" by any one side.
//!
use std::fmt::{self, Display};

/// Bump whenever a column name or the axis order changes.
pub const MULTILABEL_SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_LABEL_COLUMN: &str = "label";
pub const INPUT_IDS_FIELD: &str = "input_ids";

pub const MACROVASCULAR_COLUMN: &str = "macrovascular ";
pub const MICROVASCULAR_COLUMN: &str = "microvascular";
pub const COMPLICATION_COLUMN: &str = "complication";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelAxis {
    Macrovascular,
    Microvascular,
    Complication,
}

/// Declared axis order. Multi-hot vectors always follow it.
pub const LABEL_AXES: [LabelAxis; 3] = [
    LabelAxis::Macrovascular,
    LabelAxis::Microvascular,
    LabelAxis::Complication,
];

impl LabelAxis {
    /// Column name in raw tables and persisted datasets.
    pub fn column(&self) -> &'static str {
        match self {
            LabelAxis::Macrovascular => MACROVASCULAR_COLUMN,
            LabelAxis::Microvascular => MICROVASCULAR_COLUMN,
            LabelAxis::Complication => COMPLICATION_COLUMN,
        }
    }

    /// Name used in reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            LabelAxis::Macrovascular => "Macrovascular",
            LabelAxis::Microvascular => "Microvascular",
            LabelAxis::Complication => "Complication",
        }
    }
}

impl Display for LabelAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

pub fn multilabel_columns() -> Vec<&'static str> {
    LABEL_AXES.iter().map(LabelAxis::column).collect()
}
