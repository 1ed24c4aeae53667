use std::path::Path;

use log::info;
use rand::Rng;

use cgmtok_core::consts::READINGS_PER_DAY;
use cgmtok_core::models::{RawReading, RawSample};
use cgmtok_core::table::write_raw_table;
use cgmtok_tokenizers::TaskKind;
use cgmtok_tokenizers::schema::{DEFAULT_LABEL_COLUMN, multilabel_columns};

use crate::consts::{
    DIABETIC_ROWS, MULTI_LABEL_READING_MAX, MULTI_LABEL_READING_MIN, PATIENT_ID_OFFSET,
};
use crate::error::SimError;
use crate::profile::{generate_glucose_profile, seeded_rng};

pub fn patient_id(i: usize) -> String {
    format!("Patient_{}", PATIENT_ID_OFFSET + i)
}

fn to_readings(values: Vec<i64>) -> Vec<RawReading> {
    values.into_iter().map(RawReading::from).collect()
}

///
/// Rows for the single-label task. The first three are diabetic (`label` = 1),
/// the rest normal.
///
pub fn simulate_single_label<R: Rng>(
    samples: usize,
    rng: &mut R,
) -> Result<Vec<RawSample>, SimError> {
    (0..samples)
        .map(|i| {
            let is_diabetic = i < DIABETIC_ROWS;
            let profile = generate_glucose_profile(is_diabetic, rng)?;
            let label = if is_diabetic { "1" } else { "0" };
            Ok(RawSample::new(patient_id(i), to_readings(profile))
                .with_label(DEFAULT_LABEL_COLUMN, label))
        })
        .collect()
}

///
/// Rows for the multi-label task: flat readings in 80..=180 and an
/// independent 0/1 draw for every complication column.
///
pub fn simulate_multi_label<R: Rng>(samples: usize, rng: &mut R) -> Vec<RawSample> {
    (0..samples)
        .map(|i| {
            let readings = (0..READINGS_PER_DAY)
                .map(|_| rng.random_range(MULTI_LABEL_READING_MIN..=MULTI_LABEL_READING_MAX))
                .collect();

            multilabel_columns()
                .into_iter()
                .fold(
                    RawSample::new(patient_id(i), to_readings(readings)),
                    |sample, column| {
                        let value: u8 = rng.random_range(0..=1);
                        sample.with_label(column, value.to_string())
                    },
                )
        })
        .collect()
}

/// Label columns written for a task, in table order.
pub fn label_columns(task: TaskKind) -> Vec<&'static str> {
    match task {
        TaskKind::Single => vec![DEFAULT_LABEL_COLUMN],
        TaskKind::Multi => multilabel_columns(),
    }
}

pub fn simulate<R: Rng>(
    task: TaskKind,
    samples: usize,
    rng: &mut R,
) -> Result<Vec<RawSample>, SimError> {
    match task {
        TaskKind::Single => simulate_single_label(samples, rng),
        TaskKind::Multi => Ok(simulate_multi_label(samples, rng)),
    }
}

///
/// Simulate a table and write it as CSV.
///
/// # Arguments
/// - path: destination CSV
/// - task: which label layout to produce
/// - samples: number of rows
/// - seed: fixed seed for reproducible output
///
/// # Returns
/// - the rows that were written
///
pub fn write_simulated_table(
    path: &Path,
    task: TaskKind,
    samples: usize,
    seed: Option<u64>,
) -> Result<Vec<RawSample>, SimError> {
    let mut rng = seeded_rng(seed);
    let rows = simulate(task, samples, &mut rng)?;

    write_raw_table(path, &rows, &label_columns(task))?;
    info!(
        "Wrote {} simulated {} rows to {}",
        rows.len(),
        task,
        path.display()
    );

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    use cgmtok_core::table::read_raw_table;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_single_label_layout() {
        let mut rng = seeded_rng(Some(42));
        let rows = simulate_single_label(5, &mut rng).unwrap();

        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "Patient_100",
                "Patient_101",
                "Patient_102",
                "Patient_103",
                "Patient_104"
            ]
        );

        let labels: Vec<&str> = rows.iter().map(|r| r.label("label").unwrap()).collect();
        assert_eq!(labels, vec!["1", "1", "1", "0", "0"]);
        assert!(rows.iter().all(|r| r.len() == 288));
    }

    #[rstest]
    fn test_multi_label_values() {
        let mut rng = seeded_rng(Some(42));
        let rows = simulate_multi_label(20, &mut rng);

        for row in &rows {
            assert!(
                row.readings
                    .iter()
                    .filter_map(RawReading::as_f64)
                    .all(|g| (80.0..=180.0).contains(&g))
            );
            for column in ["macrovascular ", "microvascular", "complication"] {
                assert!(matches!(row.label(column), Some("0") | Some("1")));
            }
        }
    }

    #[rstest]
    #[case(TaskKind::Single)]
    #[case(TaskKind::Multi)]
    fn test_write_and_read_back(#[case] task: TaskKind) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim.csv");

        let written = write_simulated_table(&path, task, 4, Some(9)).unwrap();
        let read = read_raw_table(&path, &label_columns(task)).unwrap();

        assert_eq!(read, written);
    }

    #[rstest]
    fn test_header_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim.csv");
        write_simulated_table(&path, TaskKind::Multi, 1, Some(1)).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(String::from)
            .collect();

        assert_eq!(headers.len(), 1 + 288 + 3);
        assert_eq!(headers[0], "id");
        assert_eq!(headers[1], "g_0");
        assert_eq!(headers[289], "macrovascular ");
    }

    #[rstest]
    fn test_same_seed_same_table() {
        let a = simulate(TaskKind::Single, 3, &mut seeded_rng(Some(5))).unwrap();
        let b = simulate(TaskKind::Single, 3, &mut seeded_rng(Some(5))).unwrap();
        assert_eq!(a, b);
    }
}
