pub const DATA_FILE_NAME: &str = "data-00000-of-00001.arrow";
pub const DATASET_INFO_FILE_NAME: &str = "dataset_info.json";
pub const STATE_FILE_NAME: &str = "state.json";
