use crate::labels::Labels;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSample {
    pub input_ids: Vec<u32>,
    pub labels: Labels,
}

impl EncodedSample {
    pub fn len(&self) -> usize {
        self.input_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input_ids.is_empty()
    }
}
