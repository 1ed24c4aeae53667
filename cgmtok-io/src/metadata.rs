//!
//! JSON metadata written next to the Arrow payload.
//!
//! `dataset_info.json` and `state.json` follow the field names the Hugging Face `datasets`
//! library expects. The `cgmtok` block is ours and is what [`crate::EncodedDataset::load_from_disk`]
//! relies on.
//!
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use cgmtok_tokenizers::TaskKind;
use cgmtok_tokenizers::schema::{INPUT_IDS_FIELD, MULTILABEL_SCHEMA_VERSION};

use crate::consts::DATA_FILE_NAME;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub task: TaskKind,
    pub schema_version: u32,
    pub num_rows: usize,
    pub label_fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub description: String,
    pub features: Map<String, Value>,
    pub cgmtok: DatasetSummary,
}

impl DatasetInfo {
    pub fn new(task: TaskKind, num_rows: usize, label_fields: &[String]) -> Self {
        let mut features = Map::new();
        features.insert(
            INPUT_IDS_FIELD.to_string(),
            json!({
                "feature": { "dtype": "int64", "_type": "Value" },
                "_type": "Sequence"
            }),
        );
        for field in label_fields {
            features.insert(field.clone(), json!({ "dtype": "int64", "_type": "Value" }));
        }

        DatasetInfo {
            description: format!("Tokenized CGM sequences ({} label)", task),
            features,
            cgmtok: DatasetSummary {
                task,
                schema_version: MULTILABEL_SCHEMA_VERSION,
                num_rows,
                label_fields: label_fields.to_vec(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFile {
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetState {
    #[serde(rename = "_data_files")]
    pub data_files: Vec<DataFile>,
    #[serde(rename = "_fingerprint")]
    pub fingerprint: String,
    #[serde(rename = "_format_columns")]
    pub format_columns: Option<Vec<String>>,
    #[serde(rename = "_format_kwargs")]
    pub format_kwargs: Map<String, Value>,
    #[serde(rename = "_format_type")]
    pub format_type: Option<String>,
    #[serde(rename = "_output_all_columns")]
    pub output_all_columns: bool,
    #[serde(rename = "_split")]
    pub split: Option<String>,
}

impl DatasetState {
    pub fn new(fingerprint: String) -> Self {
        DatasetState {
            data_files: vec![DataFile {
                filename: DATA_FILE_NAME.to_string(),
            }],
            fingerprint,
            format_columns: None,
            format_kwargs: Map::new(),
            format_type: None,
            output_all_columns: false,
            split: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_info_lists_every_feature() {
        let fields = vec!["macrovascular ".to_string(), "microvascular".to_string()];
        let info = DatasetInfo::new(TaskKind::Multi, 4, &fields);

        assert_eq!(info.features.len(), 3);
        assert!(info.features.contains_key("macrovascular "));
        assert_eq!(info.features["input_ids"]["_type"], "Sequence");
        assert_eq!(info.cgmtok.num_rows, 4);
    }

    #[test]
    fn test_state_uses_underscore_names() {
        let state = DatasetState::new("abc".to_string());
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["_fingerprint"], "abc");
        assert_eq!(value["_data_files"][0]["filename"], DATA_FILE_NAME);
    }
}
