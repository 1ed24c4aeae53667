use std::ffi::OsStr;
use std::fmt::{self, Display};
use std::fs::read_to_string;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SpecialToken {
    Unk,
    Cls,
    Pad,
}

impl Display for SpecialToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecialToken::Unk => write!(f, "unk"),
            SpecialToken::Cls => write!(f, "cls"),
            SpecialToken::Pad => write!(f, "pad"),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SpecialTokenAssignment {
    pub name: SpecialToken,
    pub aliases: Vec<String>, // tried before the built-in aliases
}

///
/// Which label representation a dataset carries.
///
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    #[default]
    Single,
    Multi,
}

impl FromStr for TaskKind {
    type Err = TokenizerConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(TaskKind::Single),
            "multi" => Ok(TaskKind::Multi),
            _ => Err(TokenizerConfigError::InvalidTaskKind(s.to_string())),
        }
    }
}

impl Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Single => write!(f, "single"),
            TaskKind::Multi => write!(f, "multi"),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TokenizerConfig {
    pub vocab: String,
    pub task: Option<TaskKind>,
    pub label_column: Option<String>,
    pub clamp_min: Option<f64>,
    pub clamp_max: Option<f64>,
    pub strict_special_tokens: Option<bool>,
    pub special_tokens: Option<Vec<SpecialTokenAssignment>>,
}

#[derive(Debug)]
pub enum TokenizerInputFileType {
    Toml,
    Json,
    JsonGz,
}

#[derive(Error, Debug)]
pub enum TokenizerConfigError {
    #[error(
        "Missing or invalid file extension in tokenizer input file. It must be `toml`, `json` or `json.gz`"
    )]
    InvalidFileType,
    #[error("Invalid task kind: {0}. Valid options are 'single' or 'multi'")]
    InvalidTaskKind(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type TokenizerConfigResult<T> = std::result::Result<T, TokenizerConfigError>;

impl TokenizerInputFileType {
    ///
    /// Determine the type of the tokenizer input file based on its extension.
    /// # Arguments
    /// * `path` - A reference to a `Path` object representing the file path.
    /// # Returns
    /// * `TokenizerInputFileType` - An enum representing the type of the tokenizer input file.
    ///
    pub fn from_path(path: &Path) -> TokenizerConfigResult<Self> {
        match path.extension().and_then(OsStr::to_str) {
            Some("gz") => {
                let file_stem = path
                    .file_stem()
                    .ok_or(TokenizerConfigError::InvalidFileType)?;
                let ext2 = Path::new(file_stem)
                    .extension()
                    .and_then(OsStr::to_str)
                    .ok_or(TokenizerConfigError::InvalidFileType)?;
                if ext2 == "json" {
                    Ok(TokenizerInputFileType::JsonGz)
                } else {
                    Err(TokenizerConfigError::InvalidFileType)
                }
            }
            Some("toml") => Ok(TokenizerInputFileType::Toml),
            Some("json") => Ok(TokenizerInputFileType::Json),
            _ => Err(TokenizerConfigError::InvalidFileType),
        }
    }
}

impl TryFrom<&Path> for TokenizerConfig {
    type Error = TokenizerConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use std::path::PathBuf;

    #[rstest]
    fn test_try_from_toml() {
        let path = PathBuf::from("../tests/data/cgm/tokenizer.toml");
        let config = TokenizerConfig::try_from(path.as_path()).unwrap();

        assert_eq!(config.vocab, "vocab.json");
        assert_eq!(config.task, Some(TaskKind::Single));
        assert_eq!(config.label_column.as_deref(), Some("label"));
        assert_eq!(config.special_tokens.is_none(), true);
    }

    #[rstest]
    fn test_bad_task_kind_is_rejected() {
        let path = PathBuf::from("../tests/data/cgm/tokenizer_bad_task.toml");
        let result = TokenizerConfig::try_from(path.as_path());
        assert!(matches!(result, Err(TokenizerConfigError::Toml(_))));
    }

    #[rstest]
    fn test_custom_special_tokens() {
        let path = PathBuf::from("../tests/data/cgm/tokenizer_custom_specials.toml");
        let config = TokenizerConfig::try_from(path.as_path()).unwrap();
        let special_tokens = config.special_tokens.unwrap();

        assert_eq!(special_tokens.len(), 1);
        assert_eq!(special_tokens[0].name, SpecialToken::Unk);
        assert_eq!(special_tokens[0].aliases, vec!["<UNKNOWN>".to_string()]);
    }

    #[rstest]
    #[case("vocab.toml", "toml")]
    #[case("vocab.json", "json")]
    #[case("vocab.json.gz", "json.gz")]
    fn test_from_path(#[case] path: &str, #[case] expected: &str) {
        let file_type = TokenizerInputFileType::from_path(Path::new(path)).unwrap();
        let found = match file_type {
            TokenizerInputFileType::Toml => "toml",
            TokenizerInputFileType::Json => "json",
            TokenizerInputFileType::JsonGz => "json.gz",
        };
        assert_eq!(found, expected);
    }

    #[rstest]
    #[case("invalid.xyz")]
    #[case("vocab.pkl")]
    #[case("vocab.csv.gz")]
    fn test_from_path_for_invalid_extension(#[case] path: &str) {
        let file_type = TokenizerInputFileType::from_path(Path::new(path));
        assert_eq!(file_type.is_err(), true);
    }

    #[rstest]
    fn test_task_kind_from_str() {
        assert_eq!(TaskKind::from_str("Multi").unwrap(), TaskKind::Multi);
        assert!(TaskKind::from_str("both").is_err());
    }
}
