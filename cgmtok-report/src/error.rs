use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("No {file} found under {root}. Run the model first or check the output root.", root = .0.display(), file = crate::consts::PREDICTIONS_FILE_NAME)]
    NoPredictions(PathBuf),

    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Predictions are not a rectangular matrix: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Label ids do not match the predictions: {0}")]
    LabelMismatch(String),

    #[error("Predictions are empty")]
    Empty,

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
