pub const PREDICTIONS_FILE_NAME: &str = "predictions.json";
pub const ANALYSIS_SUFFIX: &str = "_analysis.csv";

/// A multi-label axis is positive when its probability is strictly above this.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Rows printed to the console; the CSV always holds every row.
pub const SUMMARY_ROWS: usize = 5;

/// Class names of the single-label task, by class id.
pub const DEFAULT_CLASS_NAMES: &[&str] = &["Normal", "Diabetes (T2D)", "Impaired (IGR)"];
