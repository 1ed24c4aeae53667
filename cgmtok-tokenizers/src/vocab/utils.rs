use std::collections::HashMap;

use serde::Deserialize;

use super::VocabKey;

///
/// On-disk layouts of a vocabulary file.
///
/// - `Map`: a JSON object, `{"40": 5, "<unk>": 0}`; every key is a text key
/// - `Pairs`: a JSON array of `[key, id]` pairs, where a key may be an integer
///
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawVocab {
    Map(HashMap<String, u32>),
    Pairs(Vec<(VocabKey, u32)>),
}

impl RawVocab {
    pub fn into_entries(self) -> Vec<(VocabKey, u32)> {
        match self {
            RawVocab::Map(map) => map
                .into_iter()
                .map(|(key, id)| (VocabKey::Text(key), id))
                .collect(),
            RawVocab::Pairs(pairs) => pairs,
        }
    }
}
