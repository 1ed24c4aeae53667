//!
//! Reading and writing of raw CGM tables.
//!
//! A raw table is a CSV file with a header row. The first column is the sample identifier.
//! Label columns are located by their exact header text. Every remaining column is a glucose
//! reading, kept in file order.
//!
use std::path::Path;

use log::debug;

use crate::consts::{DEFAULT_ID_COLUMN, READING_COLUMN_PREFIX};
use crate::errors::TableError;
use crate::models::{RawReading, RawSample};
use crate::utils::get_dynamic_reader;

///
/// Column positions resolved from a table header.
///
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub id_index: usize,
    pub reading_indices: Vec<usize>,
    pub label_indices: Vec<(String, usize)>,
}

impl TableLayout {
    ///
    /// Resolve the layout of a header row.
    ///
    /// # Arguments
    /// - `headers`: the header cells, untrimmed
    /// - `label_columns`: label column names to locate, matched byte-for-byte
    ///
    pub fn from_headers<'a, I>(headers: I, label_columns: &[&str]) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let headers: Vec<&str> = headers.into_iter().collect();

        let mut label_indices = Vec::with_capacity(label_columns.len());
        for column in label_columns {
            let idx = headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| TableError::MissingColumn(column.to_string()))?;
            label_indices.push((column.to_string(), idx));
        }

        // the id column is always the first one
        let id_index = 0;
        let reading_indices: Vec<usize> = (0..headers.len())
            .filter(|idx| *idx != id_index && !label_indices.iter().any(|(_, l)| l == idx))
            .collect();

        if reading_indices.is_empty() {
            return Err(TableError::NoReadingColumns);
        }

        Ok(TableLayout {
            id_index,
            reading_indices,
            label_indices,
        })
    }
}

///
/// Read a raw table (optionally gzip'd) fully into memory.
///
/// # Arguments
/// - `path`: path to the csv or csv.gz file
/// - `label_columns`: names of the label columns, matched verbatim
///
pub fn read_raw_table(path: &Path, label_columns: &[&str]) -> Result<Vec<RawSample>, TableError> {
    if !path.exists() {
        return Err(TableError::NotFound(path.to_path_buf()));
    }

    let reader = get_dynamic_reader(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(TableError::MissingHeader(path.to_path_buf()));
    }

    let layout = TableLayout::from_headers(headers.iter(), label_columns)?;
    debug!(
        "table layout for {:?}: {} reading columns, {} label columns",
        path,
        layout.reading_indices.len(),
        layout.label_indices.len()
    );

    let mut samples = vec![];
    for record in reader.records() {
        let record = record?;

        let id = record.get(layout.id_index).unwrap_or_default().to_string();
        let readings = layout
            .reading_indices
            .iter()
            .map(|idx| RawReading::from_cell(record.get(*idx).unwrap_or_default()))
            .collect();

        let mut sample = RawSample::new(id, readings);
        for (column, idx) in layout.label_indices.iter() {
            let cell = record.get(*idx).unwrap_or_default();
            sample.labels.insert(column.clone(), cell.to_string());
        }

        samples.push(sample);
    }

    Ok(samples)
}

///
/// Write samples as a raw table: `id`, `g_0..g_{n-1}`, then the label columns in the given order.
///
/// All samples are expected to have the same number of readings as the first one.
///
pub fn write_raw_table(
    path: &Path,
    samples: &[RawSample],
    label_columns: &[&str],
) -> Result<(), TableError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let n_readings = samples.first().map(|s| s.len()).unwrap_or(0);
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = Vec::with_capacity(n_readings + label_columns.len() + 1);
    header.push(DEFAULT_ID_COLUMN.to_string());
    header.extend((0..n_readings).map(|i| format!("{}{}", READING_COLUMN_PREFIX, i)));
    header.extend(label_columns.iter().map(|c| c.to_string()));
    writer.write_record(&header)?;

    for sample in samples {
        let mut record = Vec::with_capacity(header.len());
        record.push(sample.id.clone());
        record.extend(sample.readings.iter().map(|r| match r {
            RawReading::Missing => String::new(),
            RawReading::Numeric(value) => value.to_string(),
            RawReading::Text(text) => text.clone(),
        }));
        record.extend(
            label_columns
                .iter()
                .map(|c| sample.label(c).unwrap_or_default().to_string()),
        );
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
