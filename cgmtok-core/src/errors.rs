use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Input table not found: {0}")]
    NotFound(PathBuf),

    #[error("Input table has no header row: {0}")]
    MissingHeader(PathBuf),

    #[error("Input table is missing required column: {0:?}")]
    MissingColumn(String),

    #[error("Input table has no reading columns between the id column and the label columns")]
    NoReadingColumns,

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
