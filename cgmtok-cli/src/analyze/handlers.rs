use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use cgmtok_report::consts::SUMMARY_ROWS;
use cgmtok_report::{
    MultiLabelReport, PredictionOutput, SingleLabelReport, analysis_path,
    find_latest_prediction_file,
};
use cgmtok_tokenizers::TaskKind;

fn report_single_label(output: &PredictionOutput, csv_path: &Path) -> Result<()> {
    let report = SingleLabelReport::from_predictions(output)?;

    println!("Prediction summary (first {} rows)", SUMMARY_ROWS);
    println!("{}", report.summary_table(SUMMARY_ROWS));

    if let Some(accuracy) = report.accuracy() {
        println!("Overall accuracy: {:.2}%", accuracy * 100.0);
    }

    report.write_csv(csv_path)?;
    Ok(())
}

fn report_multi_label(output: &PredictionOutput, csv_path: &Path) -> Result<()> {
    let report = MultiLabelReport::from_predictions(output)?;

    println!(
        "Multi-label summary (first {} samples, threshold {})",
        SUMMARY_ROWS,
        report.threshold()
    );
    for line in report.summary_lines(SUMMARY_ROWS) {
        println!("{line}");
    }

    if let Some(accuracy) = report.axis_accuracy() {
        for (axis, value) in accuracy {
            println!("{axis} accuracy: {:.2}%", value * 100.0);
        }
    }

    report.write_csv(csv_path)?;
    Ok(())
}

pub fn run_analyze(matches: &ArgMatches) -> Result<()> {
    let root = matches
        .get_one::<String>("root")
        .expect("A results directory is required.");
    let task = matches
        .get_one::<String>("task")
        .expect("A task kind is required.");

    let task = TaskKind::from_str(task)?;
    let root = Path::new(root);

    let predictions = find_latest_prediction_file(root)?;
    let output = PredictionOutput::from_path(&predictions)
        .with_context(|| format!("Failed to read predictions from {}", predictions.display()))?;
    info!(
        "Loaded {} samples x {} outputs",
        output.num_samples(),
        output.num_outputs()
    );

    let csv_path = analysis_path(&predictions);
    match task {
        TaskKind::Single => report_single_label(&output, &csv_path)?,
        TaskKind::Multi => report_multi_label(&output, &csv_path)?,
    }

    println!("Detailed results saved to {}", csv_path.display());
    Ok(())
}
