//!
//! Multi-label report: independent sigmoid per axis, thresholded at 0.5.
//!
use std::path::Path;

use tabled::Table;
use tabled::builder::Builder;

use cgmtok_tokenizers::schema::{LABEL_AXES, LabelAxis};

use crate::consts::DEFAULT_THRESHOLD;
use crate::error::{ReportError, Result};
use crate::math::{sigmoid, threshold};
use crate::predictions::{LabelIds, PredictionOutput};

#[derive(Debug, Clone, PartialEq)]
pub struct MultiLabelRow {
    pub sample_id: usize,
    pub probabilities: Vec<f64>,
    pub predictions: Vec<i64>,
    pub truth: Option<Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiLabelReport {
    axes: Vec<LabelAxis>,
    threshold: f64,
    has_truth: bool,
    rows: Vec<MultiLabelRow>,
}

impl MultiLabelReport {
    pub fn from_predictions(output: &PredictionOutput) -> Result<Self> {
        Self::with_threshold(output, DEFAULT_THRESHOLD)
    }

    pub fn with_threshold(output: &PredictionOutput, cutoff: f64) -> Result<Self> {
        let axes = LABEL_AXES.to_vec();
        if output.num_outputs() != axes.len() {
            return Err(ReportError::LabelMismatch(format!(
                "expected {} label axes, predictions have {}",
                axes.len(),
                output.num_outputs()
            )));
        }

        let truth = match &output.label_ids {
            None => None,
            Some(LabelIds::Multi(ids)) if ids.ncols() == axes.len() => Some(ids),
            Some(LabelIds::Multi(ids)) => {
                return Err(ReportError::LabelMismatch(format!(
                    "expected {} label axes, truth has {}",
                    axes.len(),
                    ids.ncols()
                )));
            }
            Some(LabelIds::Single(_)) => {
                return Err(ReportError::LabelMismatch(
                    "expected a label vector per sample, found class ids".to_string(),
                ));
            }
        };

        let probs = sigmoid(&output.predictions);
        let preds = threshold(&probs, cutoff);

        let rows = probs
            .rows()
            .into_iter()
            .zip(preds.rows())
            .enumerate()
            .map(|(i, (prob_row, pred_row))| MultiLabelRow {
                sample_id: i,
                probabilities: prob_row.to_vec(),
                predictions: pred_row.to_vec(),
                truth: truth.map(|ids| ids.row(i).to_vec()),
            })
            .collect();

        Ok(MultiLabelReport {
            axes,
            threshold: cutoff,
            has_truth: truth.is_some(),
            rows,
        })
    }

    pub fn rows(&self) -> &[MultiLabelRow] {
        &self.rows
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Per-axis agreement between prediction and truth, in axis order.
    pub fn axis_accuracy(&self) -> Option<Vec<(LabelAxis, f64)>> {
        if !self.has_truth || self.rows.is_empty() {
            return None;
        }

        let n = self.rows.len() as f64;
        let accuracy = self
            .axes
            .iter()
            .enumerate()
            .map(|(j, axis)| {
                let hits = self
                    .rows
                    .iter()
                    .filter(|row| {
                        row.truth
                            .as_ref()
                            .is_some_and(|truth| truth[j] == row.predictions[j])
                    })
                    .count();
                (*axis, hits as f64 / n)
            })
            .collect();

        Some(accuracy)
    }

    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec!["Sample_ID".to_string()];
        for axis in &self.axes {
            let name = axis.display_name();
            headers.push(format!("{name}_Prob"));
            headers.push(format!("{name}_Pred"));
            if self.has_truth {
                headers.push(format!("{name}_True"));
            }
        }
        headers
    }

    fn record(&self, row: &MultiLabelRow) -> Vec<String> {
        let mut record = vec![row.sample_id.to_string()];
        for j in 0..self.axes.len() {
            record.push(row.probabilities[j].to_string());
            record.push(row.predictions[j].to_string());
            if let Some(truth) = &row.truth {
                record.push(truth[j].to_string());
            }
        }
        record
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(self.headers())?;
        for row in &self.rows {
            writer.write_record(self.record(row))?;
        }
        writer.flush()?;
        Ok(())
    }

    ///
    /// Human readable lines for the first `n` samples, one line per axis:
    ///
    /// ```text
    /// Sample 0:
    ///   - Macrovascular: 50.00% -> NO | true: 0 (correct)
    /// ```
    ///
    pub fn summary_lines(&self, n: usize) -> Vec<String> {
        let mut lines = Vec::new();
        for row in self.rows.iter().take(n) {
            lines.push(format!("Sample {}:", row.sample_id));
            for (j, axis) in self.axes.iter().enumerate() {
                let status = if row.predictions[j] == 1 { "YES" } else { "NO" };
                let truth = match &row.truth {
                    Some(truth) => {
                        let verdict = if truth[j] == row.predictions[j] {
                            "correct"
                        } else {
                            "wrong"
                        };
                        format!(" | true: {} ({verdict})", truth[j])
                    }
                    None => String::new(),
                };
                lines.push(format!(
                    "  - {axis}: {:.2}% -> {status}{truth}",
                    row.probabilities[j] * 100.0
                ));
            }
        }
        lines
    }

    /// Console table of the first `n` rows.
    pub fn summary_table(&self, n: usize) -> Table {
        let mut builder = Builder::default();
        builder.push_record(self.headers());
        for row in self.rows.iter().take(n) {
            let mut record = vec![row.sample_id.to_string()];
            for j in 0..self.axes.len() {
                record.push(format!("{:.4}", row.probabilities[j]));
                record.push(row.predictions[j].to_string());
                if let Some(truth) = &row.truth {
                    record.push(truth[j].to_string());
                }
            }
            builder.push_record(record);
        }
        builder.build()
    }
}
