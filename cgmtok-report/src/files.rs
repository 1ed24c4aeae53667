use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use glob::{Pattern, glob};
use log::{info, warn};

use crate::consts::{ANALYSIS_SUFFIX, PREDICTIONS_FILE_NAME};
use crate::error::{ReportError, Result};

///
/// Every prediction artifact below `root`, at any depth.
///
pub fn find_prediction_files(root: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/**/{}",
        Pattern::escape(&root.to_string_lossy()),
        PREDICTIONS_FILE_NAME
    );

    let files = glob(&pattern)?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .collect();

    Ok(files)
}

///
/// Locate the most recently modified prediction artifact below `root`.
///
/// # Arguments
/// - root: output directory of the training runs
///
/// # Returns
/// - path to the newest `predictions.json`
///
pub fn find_latest_prediction_file(root: &Path) -> Result<PathBuf> {
    let mut latest: Option<(SystemTime, PathBuf)> = None;

    for path in find_prediction_files(root)? {
        let modified = fs::metadata(&path)?.modified()?;
        let newer = match &latest {
            Some((best, _)) => modified > *best,
            None => true,
        };
        if newer {
            latest = Some((modified, path));
        }
    }

    let (_, path) = latest.ok_or_else(|| ReportError::NoPredictions(root.to_path_buf()))?;
    info!("Using latest prediction file: {}", path.display());

    Ok(path)
}

/// `<dir>/predictions.json` -> `<dir>/predictions_analysis.csv`
pub fn analysis_path(predictions: &Path) -> PathBuf {
    let stem = predictions
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "predictions".to_string());
    predictions.with_file_name(format!("{stem}{ANALYSIS_SUFFIX}"))
}
