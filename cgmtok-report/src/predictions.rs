use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::{Array2, ErrorKind, ShapeError};
use serde::Deserialize;

use crate::error::{ReportError, Result};

// Multi-label trainers emit float truth (BCE targets), so both shapes are read as f64.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLabelIds {
    Flat(Vec<f64>),
    Nested(Vec<Vec<f64>>),
}

#[derive(Debug, Deserialize)]
struct RawPredictionOutput {
    predictions: Vec<Vec<f64>>,
    #[serde(default)]
    label_ids: Option<RawLabelIds>,
}

/// Ground truth stored alongside the logits.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelIds {
    /// One class id per sample.
    Single(Vec<i64>),
    /// One 0/1 vector per sample.
    Multi(Array2<i64>),
}

/// Raw logits (samples x classes or samples x axes) and optional truth.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionOutput {
    pub predictions: Array2<f64>,
    pub label_ids: Option<LabelIds>,
}

fn to_matrix<T: Copy>(rows: Vec<Vec<T>>) -> Result<Array2<T>> {
    let n_rows = rows.len();
    let n_cols = rows.first().map(Vec::len).unwrap_or(0);

    if rows.iter().any(|row| row.len() != n_cols) {
        return Err(ShapeError::from_kind(ErrorKind::IncompatibleShape).into());
    }

    let flat: Vec<T> = rows.into_iter().flatten().collect();
    Ok(Array2::from_shape_vec((n_rows, n_cols), flat)?)
}

impl PredictionOutput {
    pub fn new(predictions: Array2<f64>, label_ids: Option<LabelIds>) -> Self {
        PredictionOutput {
            predictions,
            label_ids,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let raw: RawPredictionOutput = serde_json::from_reader(reader)?;
        Self::try_from(raw)
    }

    pub fn num_samples(&self) -> usize {
        self.predictions.nrows()
    }

    pub fn num_outputs(&self) -> usize {
        self.predictions.ncols()
    }
}

impl TryFrom<RawPredictionOutput> for PredictionOutput {
    type Error = ReportError;

    fn try_from(raw: RawPredictionOutput) -> Result<Self> {
        let predictions = to_matrix(raw.predictions)?;
        if predictions.is_empty() {
            return Err(ReportError::Empty);
        }

        let label_ids = match raw.label_ids {
            None => None,
            Some(RawLabelIds::Flat(values)) => Some(LabelIds::Single(
                values.into_iter().map(|v| v.trunc() as i64).collect(),
            )),
            Some(RawLabelIds::Nested(rows)) => {
                let rows = rows
                    .into_iter()
                    .map(|row| row.into_iter().map(|v| v.trunc() as i64).collect())
                    .collect();
                Some(LabelIds::Multi(to_matrix(rows)?))
            }
        };

        let n_labels = match &label_ids {
            Some(LabelIds::Single(ids)) => Some(ids.len()),
            Some(LabelIds::Multi(ids)) => Some(ids.nrows()),
            None => None,
        };
        match n_labels {
            Some(n_labels) if n_labels != predictions.nrows() => {
                return Err(ReportError::LabelMismatch(format!(
                    "{} predictions but {} label rows",
                    predictions.nrows(),
                    n_labels
                )));
            }
            _ => {}
        }

        Ok(PredictionOutput {
            predictions,
            label_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use ndarray::array;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn parse(json: &str) -> Result<PredictionOutput> {
        let raw: RawPredictionOutput = serde_json::from_str(json)?;
        PredictionOutput::try_from(raw)
    }

    #[rstest]
    fn test_read_single_label_fixture() {
        let path = Path::new("../tests/data/cgm/runs/single/checkpoint-1/predictions.json");
        let output = PredictionOutput::from_path(path).unwrap();

        assert_eq!(output.num_samples(), 4);
        assert_eq!(output.num_outputs(), 3);
        assert_eq!(output.label_ids, Some(LabelIds::Single(vec![0, 1, 1, 0])));
    }

    #[rstest]
    fn test_read_multi_label_float_truth() {
        let output = parse(
            r#"{"predictions": [[0.0, 2.0, -2.0]], "label_ids": [[0.0, 1.0, 0.0]]}"#,
        )
        .unwrap();

        assert_eq!(output.label_ids, Some(LabelIds::Multi(array![[0, 1, 0]])));
    }

    #[rstest]
    fn test_label_ids_are_optional() {
        let output = parse(r#"{"predictions": [[1.0, 2.0]]}"#).unwrap();
        assert_eq!(output.label_ids, None);
        assert_eq!(output.predictions, array![[1.0, 2.0]]);
    }

    #[rstest]
    #[case(r#"{"predictions": [[1.0, 2.0], [1.0]]}"#)]
    fn test_ragged_predictions(#[case] json: &str) {
        assert!(matches!(parse(json), Err(ReportError::Shape(_))));
    }

    #[rstest]
    fn test_empty_predictions() {
        assert!(matches!(
            parse(r#"{"predictions": []}"#),
            Err(ReportError::Empty)
        ));
    }

    #[rstest]
    fn test_label_count_mismatch() {
        let result = parse(r#"{"predictions": [[1.0, 2.0]], "label_ids": [0, 1]}"#);
        assert!(matches!(result, Err(ReportError::LabelMismatch(_))));
    }

    #[rstest]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = PredictionOutput::from_path(&dir.path().join("predictions.json"));
        assert!(matches!(result, Err(ReportError::Io(_))));
    }

    #[rstest]
    fn test_from_path_broken_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions.json");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"{\"predictions\": ").unwrap();

        let result = PredictionOutput::from_path(&path);
        assert!(matches!(result, Err(ReportError::Json(_))));
    }
}
