use thiserror::Error;

use cgmtok_core::errors::TableError;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid noise distribution: {0}")]
    Distribution(#[from] rand_distr::NormalError),

    #[error(transparent)]
    Table(#[from] TableError),
}
