use std::collections::BTreeMap;
use std::fs::{File, create_dir_all};
use std::hash::{Hash, Hasher};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Int64Array, Int64Builder, ListArray, ListBuilder, StringArray};
use arrow::ipc::reader::StreamReader;
use arrow::ipc::writer::StreamWriter;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use fxhash::FxHasher;
use log::{debug, info};

use cgmtok_core::models::RawSample;
use cgmtok_tokenizers::schema::INPUT_IDS_FIELD;
use cgmtok_tokenizers::{EncodedSample, LabelBuilder, LabelError, Labels, TaskKind, Tokenizer};

use crate::consts::{DATA_FILE_NAME, DATASET_INFO_FILE_NAME, STATE_FILE_NAME};
use crate::error::{PersistenceError, Result};
use crate::metadata::{DatasetInfo, DatasetState};

/// Number of leading ids shown per row in a preview.
const PREVIEW_IDS: usize = 8;

///
/// A fully encoded dataset held in memory until it is saved in one go.
///
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedDataset {
    task: TaskKind,
    label_fields: Vec<String>,
    rows: Vec<EncodedSample>,
}

impl EncodedDataset {
    pub fn new(task: TaskKind, label_fields: Vec<String>) -> Self {
        Self {
            task,
            label_fields,
            rows: vec![],
        }
    }

    pub fn push(&mut self, sample: EncodedSample) {
        self.rows.push(sample);
    }

    pub fn task(&self) -> TaskKind {
        self.task
    }

    pub fn label_fields(&self) -> &[String] {
        &self.label_fields
    }

    pub fn rows(&self) -> &[EncodedSample] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    ///
    /// How often each value occurs, per label field, in field order.
    ///
    pub fn label_counts(&self) -> Vec<(String, BTreeMap<i64, usize>)> {
        self.label_fields
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                let mut counts = BTreeMap::new();
                for row in self.rows.iter() {
                    if let Some(value) = row.labels.values().get(idx) {
                        *counts.entry(*value).or_insert(0) += 1;
                    }
                }
                (field.clone(), counts)
            })
            .collect()
    }

    ///
    /// Content hash of the rows. Identical inputs give identical fingerprints, so a rerun
    /// over the same table can be recognised.
    ///
    pub fn fingerprint(&self) -> String {
        let mut hasher = FxHasher::default();
        self.label_fields.hash(&mut hasher);
        for row in self.rows.iter() {
            row.input_ids.hash(&mut hasher);
            row.labels.values().hash(&mut hasher);
        }
        format!("{:016x}", hasher.finish())
    }

    ///
    /// Build the Arrow representation: `input_ids` as `list<int64>` and one `int64` column per
    /// label field.
    ///
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let mut input_ids = ListBuilder::new(Int64Builder::new());
        for row in self.rows.iter() {
            for id in row.input_ids.iter() {
                input_ids.values().append_value(*id as i64);
            }
            input_ids.append(true);
        }

        let mut columns: Vec<(String, ArrayRef)> =
            vec![(INPUT_IDS_FIELD.to_string(), Arc::new(input_ids.finish()) as ArrayRef)];

        for (idx, field) in self.label_fields.iter().enumerate() {
            let values: Int64Array = self
                .rows
                .iter()
                .map(|row| row.labels.values().get(idx).copied())
                .collect();
            columns.push((field.clone(), Arc::new(values) as ArrayRef));
        }

        Ok(RecordBatch::try_from_iter(columns)?)
    }

    fn extend_from_batch(&mut self, batch: &RecordBatch) -> Result<()> {
        let input_ids = batch
            .column_by_name(INPUT_IDS_FIELD)
            .and_then(|c| c.as_any().downcast_ref::<ListArray>())
            .ok_or_else(|| {
                PersistenceError::InvalidDataset(format!("missing list column {}", INPUT_IDS_FIELD))
            })?;

        let label_columns = self
            .label_fields
            .iter()
            .map(|field| {
                batch
                    .column_by_name(field)
                    .and_then(|c| c.as_any().downcast_ref::<Int64Array>())
                    .ok_or_else(|| {
                        PersistenceError::InvalidDataset(format!("missing label column {:?}", field))
                    })
            })
            .collect::<Result<Vec<&Int64Array>>>()?;

        for i in 0..batch.num_rows() {
            let ids = input_ids.value(i);
            let ids = ids
                .as_any()
                .downcast_ref::<Int64Array>()
                .ok_or_else(|| PersistenceError::InvalidDataset("input_ids are not int64".into()))?;
            let ids = ids
                .values()
                .iter()
                .map(|id| {
                    u32::try_from(*id).map_err(|_| {
                        PersistenceError::InvalidDataset(format!("token id out of range: {}", id))
                    })
                })
                .collect::<Result<Vec<u32>>>()?;

            let values: Vec<i64> = label_columns.iter().map(|c| c.value(i)).collect();
            let labels = match self.task {
                TaskKind::Single => Labels::Single(values.first().copied().ok_or_else(|| {
                    PersistenceError::InvalidDataset("single-label dataset without a label".into())
                })?),
                TaskKind::Multi => Labels::Multi(values),
            };

            self.rows.push(EncodedSample {
                input_ids: ids,
                labels,
            });
        }

        Ok(())
    }

    ///
    /// Save the dataset to a directory, overwriting any previous run.
    ///
    /// Everything is encoded in memory first, so a failure before the directory is created
    /// leaves nothing behind. A failure while writing leaves an unusable directory.
    ///
    /// # Arguments
    /// - dir: the directory to save the dataset to
    ///
    pub fn save_to_disk<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();

        let batch = self.to_record_batch()?;
        let info = DatasetInfo::new(self.task, self.len(), &self.label_fields);
        let state = DatasetState::new(self.fingerprint());

        create_dir_all(dir).map_err(|_| PersistenceError::DirectoryCreation(dir.to_path_buf()))?;

        let file = File::create(dir.join(DATA_FILE_NAME))?;
        let mut writer = StreamWriter::try_new(BufWriter::new(file), &batch.schema())?;
        writer.write(&batch)?;
        writer.finish()?;
        writer.into_inner()?.flush()?;

        let mut info_writer = BufWriter::new(File::create(dir.join(DATASET_INFO_FILE_NAME))?);
        serde_json::to_writer_pretty(&mut info_writer, &info)?;
        info_writer.flush()?;

        let mut state_writer = BufWriter::new(File::create(dir.join(STATE_FILE_NAME))?);
        serde_json::to_writer_pretty(&mut state_writer, &state)?;
        state_writer.flush()?;

        info!(
            "saved {} rows to {:?} (fingerprint {})",
            self.len(),
            dir,
            state.fingerprint
        );

        Ok(())
    }

    ///
    /// Load a dataset previously written with [`EncodedDataset::save_to_disk`].
    ///
    pub fn load_from_disk<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();

        let info_path = dir.join(DATASET_INFO_FILE_NAME);
        let data_path = dir.join(DATA_FILE_NAME);
        if !info_path.exists() || !data_path.exists() {
            return Err(PersistenceError::InvalidDataset(format!(
                "{:?} does not contain {} and {}",
                dir, DATASET_INFO_FILE_NAME, DATA_FILE_NAME
            )));
        }

        let info: DatasetInfo = serde_json::from_reader(BufReader::new(File::open(info_path)?))?;
        let mut dataset = EncodedDataset::new(info.cgmtok.task, info.cgmtok.label_fields);

        let reader = StreamReader::try_new(BufReader::new(File::open(data_path)?), None)?;
        for batch in reader {
            dataset.extend_from_batch(&batch?)?;
        }

        debug!("loaded {} rows from {:?}", dataset.len(), dir);
        Ok(dataset)
    }

    ///
    /// Render the first `n` rows as a table: sequence length, leading ids, and labels.
    ///
    pub fn preview(&self, n: usize) -> Result<String> {
        let rows = &self.rows[..n.min(self.len())];

        let lengths: Int64Array = rows.iter().map(|r| Some(r.len() as i64)).collect();
        let heads: StringArray = rows
            .iter()
            .map(|r| {
                let head: Vec<String> = r
                    .input_ids
                    .iter()
                    .take(PREVIEW_IDS)
                    .map(|id| id.to_string())
                    .collect();
                let more = if r.len() > PREVIEW_IDS { ", ..." } else { "" };
                Some(format!("[{}{}]", head.join(", "), more))
            })
            .collect();

        let mut columns: Vec<(String, ArrayRef)> = vec![
            ("length".to_string(), Arc::new(lengths) as ArrayRef),
            (INPUT_IDS_FIELD.to_string(), Arc::new(heads) as ArrayRef),
        ];
        for (idx, field) in self.label_fields.iter().enumerate() {
            let values: Int64Array = rows
                .iter()
                .map(|row| row.labels.values().get(idx).copied())
                .collect();
            columns.push((field.clone(), Arc::new(values) as ArrayRef));
        }

        let batch = RecordBatch::try_from_iter(columns)?;
        Ok(pretty_format_batches(&[batch])?.to_string())
    }
}

///
/// Encodes raw rows one at a time into an [`EncodedDataset`].
///
pub struct DatasetAssembler<'a> {
    tokenizer: &'a Tokenizer,
    labels: &'a LabelBuilder,
    dataset: EncodedDataset,
}

impl<'a> DatasetAssembler<'a> {
    pub fn new(tokenizer: &'a Tokenizer, labels: &'a LabelBuilder) -> Self {
        Self {
            tokenizer,
            labels,
            dataset: EncodedDataset::new(labels.task(), labels.output_fields()),
        }
    }

    ///
    /// Encode one raw row and append it.
    ///
    pub fn push(&mut self, sample: &RawSample) -> std::result::Result<(), LabelError> {
        let row = self.dataset.len();
        let encoded = self.tokenizer.encode_sample(sample, self.labels, row)?;
        self.dataset.push(encoded);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    pub fn finish(self) -> EncodedDataset {
        self.dataset
    }

    ///
    /// Encode every row. The first label error aborts the whole run.
    ///
    pub fn assemble<'s, I>(mut self, rows: I) -> std::result::Result<EncodedDataset, LabelError>
    where
        I: IntoIterator<Item = &'s RawSample>,
    {
        for sample in rows {
            self.push(sample)?;
        }
        Ok(self.finish())
    }
}
