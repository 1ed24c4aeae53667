//!
//! Single-label report: softmax over classes, argmax prediction, optional truth.
//!
use std::path::Path;

use tabled::Table;
use tabled::builder::Builder;

use crate::consts::DEFAULT_CLASS_NAMES;
use crate::error::{ReportError, Result};
use crate::math::{argmax, softmax};
use crate::predictions::{LabelIds, PredictionOutput};

pub fn class_name(id: usize) -> String {
    DEFAULT_CLASS_NAMES
        .get(id)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("Class_{id}"))
}

fn label_name(id: i64) -> String {
    usize::try_from(id)
        .map(class_name)
        .unwrap_or_else(|_| format!("Class_{id}"))
}

#[derive(Debug, Clone, PartialEq)]
pub struct SingleLabelRow {
    pub predicted_class_id: usize,
    pub max_probability: f64,
    pub probabilities: Vec<f64>,
    pub true_label_id: Option<i64>,
}

impl SingleLabelRow {
    pub fn is_correct(&self) -> Option<bool> {
        self.true_label_id
            .map(|truth| truth == self.predicted_class_id as i64)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SingleLabelReport {
    num_classes: usize,
    has_truth: bool,
    rows: Vec<SingleLabelRow>,
}

impl SingleLabelReport {
    pub fn from_predictions(output: &PredictionOutput) -> Result<Self> {
        let truth = match &output.label_ids {
            None => None,
            Some(LabelIds::Single(ids)) => Some(ids),
            Some(LabelIds::Multi(_)) => {
                return Err(ReportError::LabelMismatch(
                    "expected one class id per sample, found label vectors".to_string(),
                ));
            }
        };

        let probs = softmax(&output.predictions);
        let rows = probs
            .rows()
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                let predicted_class_id = argmax(row);
                SingleLabelRow {
                    predicted_class_id,
                    max_probability: row[predicted_class_id],
                    probabilities: row.to_vec(),
                    true_label_id: truth.map(|ids| ids[i]),
                }
            })
            .collect();

        Ok(SingleLabelReport {
            num_classes: output.num_outputs(),
            has_truth: truth.is_some(),
            rows,
        })
    }

    pub fn rows(&self) -> &[SingleLabelRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fraction of correct predictions, when truth is present.
    pub fn accuracy(&self) -> Option<f64> {
        if !self.has_truth || self.rows.is_empty() {
            return None;
        }
        let correct = self
            .rows
            .iter()
            .filter(|row| row.is_correct() == Some(true))
            .count();
        Some(correct as f64 / self.rows.len() as f64)
    }

    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec![
            "Predicted_Class_ID".to_string(),
            "Max_Probability".to_string(),
        ];
        headers.extend((0..self.num_classes).map(|i| format!("Prob_{}", class_name(i))));
        if self.has_truth {
            headers.push("True_Label_ID".to_string());
            headers.push("Is_Correct".to_string());
        }
        headers.push("Predicted_Label".to_string());
        if self.has_truth {
            headers.push("True_Label".to_string());
        }
        headers
    }

    fn record(&self, row: &SingleLabelRow, precision: Option<usize>) -> Vec<String> {
        let fmt = |p: f64| match precision {
            Some(digits) => format!("{p:.digits$}"),
            None => p.to_string(),
        };

        let mut record = vec![
            row.predicted_class_id.to_string(),
            fmt(row.max_probability),
        ];
        record.extend(row.probabilities.iter().map(|&p| fmt(p)));
        if let (Some(truth), Some(correct)) = (row.true_label_id, row.is_correct()) {
            let correct = if correct { "True" } else { "False" };
            record.push(truth.to_string());
            record.push(correct.to_string());
        }
        record.push(class_name(row.predicted_class_id));
        if let Some(truth) = row.true_label_id {
            record.push(label_name(truth));
        }
        record
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(self.headers())?;
        for row in &self.rows {
            writer.write_record(self.record(row, None))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Console table of the first `n` rows.
    pub fn summary_table(&self, n: usize) -> Table {
        let mut builder = Builder::default();
        builder.push_record(self.headers());
        for row in self.rows.iter().take(n) {
            builder.push_record(self.record(row, Some(4)));
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn output() -> PredictionOutput {
        PredictionOutput::from_path(Path::new(
            "../tests/data/cgm/runs/single/checkpoint-1/predictions.json",
        ))
        .unwrap()
    }

    #[rstest]
    fn test_class_names() {
        assert_eq!(class_name(0), "Normal");
        assert_eq!(class_name(1), "Diabetes (T2D)");
        assert_eq!(class_name(2), "Impaired (IGR)");
        assert_eq!(class_name(3), "Class_3");
    }

    #[rstest]
    fn test_two_class_logits() {
        let output = PredictionOutput::new(array![[2.0, -1.0]], None);
        let report = SingleLabelReport::from_predictions(&output).unwrap();

        let row = &report.rows()[0];
        assert_eq!(row.predicted_class_id, 0);
        assert!((row.max_probability - 0.9526).abs() < 1e-4);
        assert!((row.probabilities[1] - 0.0474).abs() < 1e-4);
        assert_eq!(report.accuracy(), None);
    }

    #[rstest]
    fn test_predictions_and_accuracy(output: PredictionOutput) {
        let report = SingleLabelReport::from_predictions(&output).unwrap();

        let predicted: Vec<usize> = report.rows().iter().map(|r| r.predicted_class_id).collect();
        assert_eq!(predicted, vec![0, 1, 2, 0]);

        let correct: Vec<Option<bool>> = report.rows().iter().map(|r| r.is_correct()).collect();
        assert_eq!(
            correct,
            vec![Some(true), Some(true), Some(false), Some(true)]
        );
        assert_eq!(report.accuracy(), Some(0.75));
    }

    #[rstest]
    fn test_headers(output: PredictionOutput) {
        let report = SingleLabelReport::from_predictions(&output).unwrap();
        assert_eq!(
            report.headers(),
            vec![
                "Predicted_Class_ID",
                "Max_Probability",
                "Prob_Normal",
                "Prob_Diabetes (T2D)",
                "Prob_Impaired (IGR)",
                "True_Label_ID",
                "Is_Correct",
                "Predicted_Label",
                "True_Label",
            ]
        );
    }

    #[rstest]
    fn test_write_csv(output: PredictionOutput) {
        let report = SingleLabelReport::from_predictions(&output).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions_analysis.csv");
        report.write_csv(&path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 4);

        let third = &records[2];
        assert_eq!(&third[0], "2");
        assert_eq!(&third[5], "1");
        assert_eq!(&third[6], "False");
        assert_eq!(&third[7], "Impaired (IGR)");
        assert_eq!(&third[8], "Diabetes (T2D)");
    }

    #[rstest]
    fn test_rejects_multi_label_truth() {
        let output = PredictionOutput::new(
            array![[1.0, 0.0]],
            Some(LabelIds::Multi(array![[1, 0]])),
        );
        let result = SingleLabelReport::from_predictions(&output);
        assert!(matches!(result, Err(ReportError::LabelMismatch(_))));
    }

    #[rstest]
    fn test_summary_table_limits_rows(output: PredictionOutput) {
        let report = SingleLabelReport::from_predictions(&output).unwrap();
        let rendered = report.summary_table(2).to_string();

        assert!(rendered.contains("Prob_Normal"));
        assert!(rendered.contains("0.9094"));
        assert!(!rendered.contains("0.7870"));
        assert!(!rendered.contains("0.5761"));
    }
}
