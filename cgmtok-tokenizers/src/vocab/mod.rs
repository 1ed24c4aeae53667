//!
//! This module defines the `Vocabulary` struct, the persisted table that maps glucose values
//! (and special-token spellings) to token ids.
//!
//! The vocabulary is the oracle of the tokenizer. It is loaded once, never mutated, and handed
//! to every encoding call by reference.
//!
pub mod utils;

use std::collections::HashMap as StdHashMap;
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

use fxhash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cgmtok_core::utils::get_dynamic_reader;

use utils::RawVocab;

#[derive(Debug, Error)]
pub enum VocabError {
    #[error("Vocabulary file not found: {0}")]
    NotFound(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Could not parse vocabulary file: {0}")]
    Parse(#[from] serde_json::Error),
}

///
/// A vocabulary key. Authoring tools disagree on whether glucose values are stored as their
/// decimal text or as integers, so both are kept apart.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VocabKey {
    Int(i64),
    Text(String),
}

impl Display for VocabKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VocabKey::Int(value) => write!(f, "{}", value),
            VocabKey::Text(text) => write!(f, "{:?}", text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vocabulary {
    text_to_id: HashMap<String, u32>,
    int_to_id: HashMap<i64, u32>,
}

impl Vocabulary {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (VocabKey, u32)>,
    {
        let mut vocab = Vocabulary::default();
        for (key, id) in entries {
            match key {
                VocabKey::Int(value) => vocab.int_to_id.insert(value, id),
                VocabKey::Text(text) => vocab.text_to_id.insert(text, id),
            };
        }
        vocab
    }

    ///
    /// Look up a text key.
    ///
    pub fn get_text(&self, key: &str) -> Option<u32> {
        self.text_to_id.get(key).copied()
    }

    ///
    /// Look up an integer key.
    ///
    pub fn get_int(&self, key: i64) -> Option<u32> {
        self.int_to_id.get(&key).copied()
    }

    pub fn get(&self, key: &VocabKey) -> Option<u32> {
        match key {
            VocabKey::Int(value) => self.get_int(*value),
            VocabKey::Text(text) => self.get_text(text),
        }
    }

    pub fn contains_text(&self, key: &str) -> bool {
        self.text_to_id.contains_key(key)
    }

    ///
    /// Find the first alias present among the text keys, in the given priority order.
    ///
    /// # Returns:
    /// - the matching alias and its id, or None if no alias is present
    ///
    pub fn find_alias<'a, S: AsRef<str>>(&self, aliases: &'a [S]) -> Option<(&'a str, u32)> {
        aliases
            .iter()
            .map(|alias| alias.as_ref())
            .find_map(|alias| self.get_text(alias).map(|id| (alias, id)))
    }

    ///
    /// Number of entries, text and integer keys combined.
    ///
    pub fn len(&self) -> usize {
        self.text_to_id.len() + self.int_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    ///
    /// The largest id in the table, if any.
    ///
    pub fn max_id(&self) -> Option<u32> {
        self.text_to_id
            .values()
            .chain(self.int_to_id.values())
            .copied()
            .max()
    }

    ///
    /// Flatten the table into text keys, integer keys rendered in decimal.
    ///
    pub fn to_text_map(&self) -> StdHashMap<String, u32> {
        let mut map: StdHashMap<String, u32> = self
            .int_to_id
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();
        // text keys win on collision, they are looked up first
        map.extend(self.text_to_id.iter().map(|(k, v)| (k.clone(), *v)));
        map
    }
}

impl TryFrom<&Path> for Vocabulary {
    type Error = VocabError;

    fn try_from(value: &Path) -> Result<Self, Self::Error> {
        if !value.exists() {
            return Err(VocabError::NotFound(value.to_path_buf()));
        }

        let reader = get_dynamic_reader(value)?;
        let raw: RawVocab = serde_json::from_reader(reader)?;

        Ok(Vocabulary::from_entries(raw.into_entries()))
    }
}

impl Vocabulary {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, VocabError> {
        Vocabulary::try_from(path.as_ref())
    }
}
