use thiserror::Error;

use super::config::{SpecialToken, TokenizerConfigError};

#[derive(Error, Debug)]
pub enum TokenizerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] TokenizerConfigError),
    #[error("Vocabulary error: {0}")]
    Vocab(#[from] crate::vocab::VocabError),
    #[error("No {role} token found in vocabulary (tried {aliases:?})")]
    UnresolvedSpecialToken {
        role: SpecialToken,
        aliases: Vec<String>,
    },
    #[error("Invalid clamp range: [{min}, {max}]")]
    InvalidClampRange { min: f64, max: f64 },
}
