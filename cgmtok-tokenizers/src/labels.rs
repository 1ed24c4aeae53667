use thiserror::Error;

use cgmtok_core::models::RawSample;

use crate::config::TaskKind;
use crate::schema::{DEFAULT_LABEL_COLUMN, LABEL_AXES, LabelAxis};

#[derive(Debug, Error, PartialEq)]
pub enum LabelError {
    #[error("Row {row} ({id}): missing label column {column:?}")]
    MissingColumn {
        row: usize,
        id: String,
        column: String,
    },
    #[error("Row {row} ({id}): label column {column:?} holds {value:?}, which is not an integer")]
    InvalidValue {
        row: usize,
        id: String,
        column: String,
        value: String,
    },
}

///
/// The label representation of one encoded sample.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Labels {
    Single(i64),
    Multi(Vec<i64>),
}

impl Labels {
    pub fn values(&self) -> &[i64] {
        match self {
            Labels::Single(value) => std::slice::from_ref(value),
            Labels::Multi(values) => values,
        }
    }
}

///
/// Builds [`Labels`] from the raw label cells of a row.
///
#[derive(Debug, Clone, PartialEq)]
pub enum LabelBuilder {
    Single { column: String },
    Multi { axes: Vec<LabelAxis> },
}

impl Default for LabelBuilder {
    fn default() -> Self {
        LabelBuilder::Single {
            column: DEFAULT_LABEL_COLUMN.to_string(),
        }
    }
}

impl LabelBuilder {
    pub fn single<S: Into<String>>(column: S) -> Self {
        LabelBuilder::Single {
            column: column.into(),
        }
    }

    pub fn multi() -> Self {
        LabelBuilder::Multi {
            axes: LABEL_AXES.to_vec(),
        }
    }

    ///
    /// Builder for a task kind, using `label_column` for single-label tasks.
    ///
    pub fn for_task(task: TaskKind, label_column: Option<&str>) -> Self {
        match task {
            TaskKind::Single => LabelBuilder::single(label_column.unwrap_or(DEFAULT_LABEL_COLUMN)),
            TaskKind::Multi => LabelBuilder::multi(),
        }
    }

    pub fn task(&self) -> TaskKind {
        match self {
            LabelBuilder::Single { .. } => TaskKind::Single,
            LabelBuilder::Multi { .. } => TaskKind::Multi,
        }
    }

    ///
    /// The source columns this builder reads, in output order. These are also the field names
    /// of the persisted dataset.
    ///
    pub fn columns(&self) -> Vec<&str> {
        match self {
            LabelBuilder::Single { column } => vec![column.as_str()],
            LabelBuilder::Multi { axes } => axes.iter().map(LabelAxis::column).collect(),
        }
    }

    ///
    /// Label field names in a persisted dataset. Single-label datasets always use `label`,
    /// whatever the source column; multi-label datasets keep the verbatim column names.
    ///
    pub fn output_fields(&self) -> Vec<String> {
        match self {
            LabelBuilder::Single { .. } => vec![DEFAULT_LABEL_COLUMN.to_string()],
            LabelBuilder::Multi { axes } => axes.iter().map(|a| a.column().to_string()).collect(),
        }
    }

    ///
    /// Build the labels of one row.
    ///
    /// # Arguments:
    /// - `sample`: the raw row
    /// - `row`: zero-based row index, used in error messages
    ///
    pub fn build(&self, sample: &RawSample, row: usize) -> Result<Labels, LabelError> {
        match self {
            LabelBuilder::Single { column } => {
                Ok(Labels::Single(read_label(sample, column, row)?))
            }
            LabelBuilder::Multi { axes } => {
                let values = axes
                    .iter()
                    .map(|axis| read_label(sample, axis.column(), row))
                    .collect::<Result<Vec<i64>, LabelError>>()?;
                Ok(Labels::Multi(values))
            }
        }
    }
}

fn read_label(sample: &RawSample, column: &str, row: usize) -> Result<i64, LabelError> {
    let cell = sample.label(column).ok_or_else(|| LabelError::MissingColumn {
        row,
        id: sample.id.clone(),
        column: column.to_string(),
    })?;

    cast_label(cell).ok_or_else(|| LabelError::InvalidValue {
        row,
        id: sample.id.clone(),
        column: column.to_string(),
        value: cell.to_string(),
    })
}

///
/// Cast a label cell to an integer. Integers pass through, finite floats are truncated toward
/// zero and booleans become 0/1. Values are not checked against any class range.
///
pub fn cast_label(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    if let Ok(value) = cell.parse::<i64>() {
        return Some(value);
    }
    if cell.eq_ignore_ascii_case("true") {
        return Some(1);
    }
    if cell.eq_ignore_ascii_case("false") {
        return Some(0);
    }
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value.trunc() as i64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::schema::{COMPLICATION_COLUMN, MACROVASCULAR_COLUMN, MICROVASCULAR_COLUMN};

    #[rstest]
    #[case("1", Some(1))]
    #[case(" 0 ", Some(0))]
    #[case("2.0", Some(2))]
    #[case("1.9", Some(1))]
    #[case("-1.5", Some(-1))]
    #[case("True", Some(1))]
    #[case("", None)]
    #[case("NaN", None)]
    #[case("inf", None)]
    #[case("yes", None)]
    fn test_cast_label(#[case] cell: &str, #[case] expected: Option<i64>) {
        assert_eq!(cast_label(cell), expected);
    }

    #[rstest]
    fn test_single_label() {
        let sample = RawSample::new("P1", vec![]).with_label("label", "2");
        let labels = LabelBuilder::default().build(&sample, 0).unwrap();
        assert_eq!(labels, Labels::Single(2));
        assert_eq!(labels.values(), &[2]);
    }

    #[rstest]
    fn test_multi_label_follows_declared_order() {
        // insertion order deliberately differs from the axis order
        let sample = RawSample::new("P1", vec![])
            .with_label(COMPLICATION_COLUMN, "0")
            .with_label(MICROVASCULAR_COLUMN, "1")
            .with_label(MACROVASCULAR_COLUMN, "1");

        let labels = LabelBuilder::multi().build(&sample, 0).unwrap();
        assert_eq!(labels, Labels::Multi(vec![1, 1, 0]));
    }

    #[rstest]
    fn test_multi_label_needs_trailing_space() {
        let sample = RawSample::new("P7", vec![])
            .with_label("macrovascular", "1")
            .with_label(MICROVASCULAR_COLUMN, "1")
            .with_label(COMPLICATION_COLUMN, "1");

        let result = LabelBuilder::multi().build(&sample, 3);
        assert_eq!(
            result,
            Err(LabelError::MissingColumn {
                row: 3,
                id: "P7".to_string(),
                column: "macrovascular ".to_string(),
            })
        );
    }

    #[rstest]
    fn test_invalid_label_value() {
        let sample = RawSample::new("P2", vec![]).with_label("label", "");
        let result = LabelBuilder::default().build(&sample, 1);
        assert!(matches!(result, Err(LabelError::InvalidValue { row: 1, .. })));
    }

    #[rstest]
    fn test_for_task() {
        let single = LabelBuilder::for_task(TaskKind::Single, Some("outcome"));
        assert_eq!(single.columns(), vec!["outcome"]);
        assert_eq!(single.task(), TaskKind::Single);

        let multi = LabelBuilder::for_task(TaskKind::Multi, Some("ignored"));
        assert_eq!(
            multi.columns(),
            vec!["macrovascular ", "microvascular", "complication"]
        );
    }
}
