use std::iter::once;
use std::path::Path;

use cgmtok_core::models::{RawReading, RawSample};

use super::config::{TokenizerConfig, TokenizerInputFileType};
use super::consts::{DEFAULT_CLAMP_MAX, DEFAULT_CLAMP_MIN};
use super::encoding::EncodedSample;
use super::error::TokenizerError;
use super::labels::{LabelBuilder, LabelError};
use super::utils::prepare_vocab_and_special_tokens;
use super::utils::special_tokens::{SpecialTokenAliases, SpecialTokens};
use super::vocab::Vocabulary;

///
/// Closed range glucose values are clamped into before lookup.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampRange {
    min: f64,
    max: f64,
}

impl ClampRange {
    pub fn new(min: f64, max: f64) -> Result<Self, TokenizerError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(TokenizerError::InvalidClampRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn apply(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

impl Default for ClampRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_CLAMP_MIN,
            max: DEFAULT_CLAMP_MAX,
        }
    }
}

pub struct Tokenizer {
    vocab: Vocabulary,
    special_tokens: SpecialTokens,
    clamp: ClampRange,
}

impl Tokenizer {
    ///
    /// Create a new tokenizer
    ///
    pub fn new(vocab: Vocabulary, special_tokens: SpecialTokens, clamp: ClampRange) -> Self {
        Self {
            vocab,
            special_tokens,
            clamp,
        }
    }

    ///
    /// Create a new tokenizer from a vocabulary file, with the built-in special-token aliases.
    /// Fails if the `unk` or `cls` token cannot be found.
    ///
    pub fn from_vocab<P: AsRef<Path>>(vocab_path: P) -> Result<Self, TokenizerError> {
        Tokenizer::from_vocab_with(vocab_path, &SpecialTokenAliases::default(), true)
    }

    ///
    /// Create a new tokenizer from a vocabulary file with custom aliases and strictness.
    ///
    pub fn from_vocab_with<P: AsRef<Path>>(
        vocab_path: P,
        aliases: &SpecialTokenAliases,
        strict: bool,
    ) -> Result<Self, TokenizerError> {
        let (vocab, special_tokens) = prepare_vocab_and_special_tokens(vocab_path, aliases, strict)?;
        Ok(Tokenizer::new(vocab, special_tokens, ClampRange::default()))
    }

    ///
    /// Create a new tokenizer from a config file
    ///
    pub fn from_config<P: AsRef<Path>>(cfg_path: P) -> Result<Self, TokenizerError> {
        let config = TokenizerConfig::try_from(cfg_path.as_ref())?;
        let config_dir = cfg_path.as_ref().parent().unwrap_or(Path::new("."));

        Tokenizer::from_tokenizer_config(&config, config_dir)
    }

    ///
    /// Create a new tokenizer from an already parsed config.
    ///
    /// # Arguments:
    /// - `config`: the parsed config
    /// - `config_dir`: directory the config's `vocab` path is relative to
    ///
    pub fn from_tokenizer_config(
        config: &TokenizerConfig,
        config_dir: &Path,
    ) -> Result<Self, TokenizerError> {
        let vocab_path = config_dir.join(&config.vocab);

        let aliases = match &config.special_tokens {
            Some(assignments) => SpecialTokenAliases::from(assignments.clone()),
            None => SpecialTokenAliases::default(),
        };
        let clamp = ClampRange::new(
            config.clamp_min.unwrap_or(DEFAULT_CLAMP_MIN),
            config.clamp_max.unwrap_or(DEFAULT_CLAMP_MAX),
        )?;

        let (vocab, special_tokens) = prepare_vocab_and_special_tokens(
            vocab_path,
            &aliases,
            config.strict_special_tokens.unwrap_or(true),
        )?;

        Ok(Tokenizer::new(vocab, special_tokens, clamp))
    }

    ///
    /// Create a new tokenizer from a file, automatically detecting the type
    ///
    pub fn from_auto<P: AsRef<Path>>(path: P) -> Result<Self, TokenizerError> {
        let file_type = TokenizerInputFileType::from_path(path.as_ref())?;
        match file_type {
            TokenizerInputFileType::Toml => Tokenizer::from_config(path),
            TokenizerInputFileType::Json => Tokenizer::from_vocab(path),
            TokenizerInputFileType::JsonGz => Tokenizer::from_vocab(path),
        }
    }

    ///
    /// Look up the token id of a single reading.
    ///
    /// The reading is read as a float, clamped into the tokenizer's range, truncated to an
    /// integer and looked up first by its decimal text, then by its integer value.
    ///
    /// # Returns:
    /// - `None` when the reading is missing, not a number, or not in the vocabulary
    ///
    pub fn lookup(&self, reading: &RawReading) -> Option<u32> {
        let value = self.clamp.apply(reading.as_f64()?);
        let key = value.trunc() as i64;
        self.vocab
            .get_text(&key.to_string())
            .or_else(|| self.vocab.get_int(key))
    }

    ///
    /// Encode a single reading. Never fails: anything that cannot be looked up becomes the
    /// unknown token id.
    ///
    pub fn encode<R: Into<RawReading>>(&self, value: R) -> u32 {
        self.encode_reading(&value.into())
    }

    pub fn encode_reading(&self, reading: &RawReading) -> u32 {
        self.lookup(reading).unwrap_or(self.get_unk_token_id())
    }

    ///
    /// Encode a sequence of readings, prepending the class-start id. The output is always one
    /// element longer than the input.
    ///
    pub fn encode_sequence(&self, readings: &[RawReading]) -> Vec<u32> {
        let ids: Vec<Option<u32>> = once(Some(self.get_cls_token_id()))
            .chain(readings.iter().map(|reading| self.lookup(reading)))
            .collect();

        // no unresolved element may leave the encoder
        ids.into_iter()
            .map(|id| id.unwrap_or(self.get_unk_token_id()))
            .collect()
    }

    ///
    /// Encode a raw row into model input ids and labels.
    ///
    pub fn encode_sample(
        &self,
        sample: &RawSample,
        labels: &LabelBuilder,
        row: usize,
    ) -> Result<EncodedSample, LabelError> {
        Ok(EncodedSample {
            input_ids: self.encode_sequence(&sample.readings),
            labels: labels.build(sample, row)?,
        })
    }

    pub fn get_vocab_size(&self) -> usize {
        self.vocab.len()
    }

    pub fn get_vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn get_special_tokens(&self) -> &SpecialTokens {
        &self.special_tokens
    }

    pub fn get_clamp_range(&self) -> ClampRange {
        self.clamp
    }

    // ids
    pub fn get_unk_token_id(&self) -> u32 {
        self.special_tokens.unk.id
    }

    pub fn get_cls_token_id(&self) -> u32 {
        self.special_tokens.cls.id
    }

    pub fn get_pad_token_id(&self) -> u32 {
        self.special_tokens.pad.id
    }
}

#[cfg(test)]
mod tokenizer_tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::config::SpecialToken;

    #[fixture]
    fn small_tokenizer() -> Tokenizer {
        Tokenizer::from_vocab("../tests/data/cgm/vocab_small.json")
            .expect("Failed to create tokenizer from vocab.")
    }

    #[fixture]
    fn full_tokenizer() -> Tokenizer {
        Tokenizer::from_config("../tests/data/cgm/tokenizer.toml")
            .expect("Failed to create tokenizer from config.")
    }

    #[rstest]
    fn test_tokenizer_creation_from_vocab(small_tokenizer: Tokenizer) {
        assert_eq!(small_tokenizer.get_vocab_size(), 4);
        assert_eq!(small_tokenizer.get_unk_token_id(), 0);
        assert_eq!(small_tokenizer.get_cls_token_id(), 1);
        // no pad alias in this vocab
        assert_eq!(small_tokenizer.get_pad_token_id(), 0);
        assert_eq!(small_tokenizer.get_special_tokens().pad.is_resolved(), false);
    }

    #[rstest]
    fn test_tokenizer_creation_from_config(full_tokenizer: Tokenizer) {
        assert_eq!(full_tokenizer.get_vocab_size(), 264);
        assert_eq!(full_tokenizer.get_pad_token_id(), 0);
        assert_eq!(full_tokenizer.get_unk_token_id(), 1);
        assert_eq!(full_tokenizer.get_cls_token_id(), 2);
    }

    #[rstest]
    fn test_tokenizer_creation_auto_all() {
        let tokenizer = Tokenizer::from_auto("../tests/data/cgm/vocab.json").unwrap();
        assert_eq!(tokenizer.get_vocab_size(), 264);

        let tokenizer = Tokenizer::from_auto("../tests/data/cgm/vocab.json.gz").unwrap();
        assert_eq!(tokenizer.get_vocab_size(), 264);

        let tokenizer = Tokenizer::from_auto("../tests/data/cgm/tokenizer_multi.toml").unwrap();
        assert_eq!(tokenizer.get_vocab_size(), 264);

        let tokenizer = Tokenizer::from_auto("../tests/data/cgm/vocab.pkl");
        assert!(matches!(tokenizer, Err(TokenizerError::Config(_))));
    }

    #[rstest]
    fn test_tokenizer_bad_task() {
        let tokenizer = Tokenizer::from_config("../tests/data/cgm/tokenizer_bad_task.toml");
        assert_eq!(tokenizer.is_err(), true);
    }

    #[rstest]
    fn test_tokenizer_missing_vocab() {
        let tokenizer = Tokenizer::from_vocab("../tests/data/cgm/missing.json");
        assert!(matches!(tokenizer, Err(TokenizerError::Vocab(_))));
    }

    #[rstest]
    fn test_tokenizer_custom_special_tokens() {
        let tokenizer = Tokenizer::from_config("../tests/data/cgm/tokenizer_custom_specials.toml")
            .expect("Failed to create tokenizer from config.");

        // <UNKNOWN> was given priority over <unk>
        assert_eq!(tokenizer.get_unk_token_id(), 7);
        assert_eq!(
            tokenizer.get_special_tokens().unk.alias.as_deref(),
            Some("<UNKNOWN>")
        );
        // cls still resolves through the built-in aliases
        assert_eq!(tokenizer.get_cls_token_id(), 1);
        assert_eq!(tokenizer.encode("garbage"), 7);
    }

    #[rstest]
    fn test_strict_mode_rejects_missing_cls() {
        let tokenizer = Tokenizer::from_vocab("../tests/data/cgm/vocab_no_cls.json");
        assert!(matches!(
            tokenizer,
            Err(TokenizerError::UnresolvedSpecialToken {
                role: SpecialToken::Cls,
                ..
            })
        ));
    }

    #[rstest]
    fn test_lenient_mode_falls_back_to_zero() {
        let tokenizer = Tokenizer::from_config("../tests/data/cgm/tokenizer_lenient.toml")
            .expect("Lenient config should load.");
        assert_eq!(tokenizer.get_cls_token_id(), 0);

        // the fallback collides with the id of "40" in this vocabulary
        let ids = tokenizer.encode_sequence(&[RawReading::from(40.0)]);
        assert_eq!(ids, vec![0, 1]);
    }

    #[rstest]
    fn test_invalid_clamp_range() {
        assert!(ClampRange::new(300.0, 40.0).is_err());
        assert!(ClampRange::new(f64::NAN, 40.0).is_err());
        assert!(ClampRange::new(40.0, 40.0).is_ok());
    }

    #[rstest]
    fn test_end_to_end_example(small_tokenizer: Tokenizer) {
        let readings = vec![
            RawReading::from(100.0),
            RawReading::from(f64::NAN),
            RawReading::from(500.0),
        ];
        assert_eq!(small_tokenizer.encode_sequence(&readings), vec![1, 0, 0, 6]);
    }

    #[rstest]
    fn test_unknown_inputs(small_tokenizer: Tokenizer) {
        let unk = small_tokenizer.get_unk_token_id();
        assert_eq!(small_tokenizer.encode(f64::NAN), unk);
        assert_eq!(small_tokenizer.encode("garbage"), unk);
        assert_eq!(small_tokenizer.encode(RawReading::Missing), unk);
        assert_eq!(small_tokenizer.encode(None::<f64>), unk);
    }

    #[rstest]
    #[case(500.0, 300.0)]
    #[case(300.0, 300.0)]
    #[case(f64::INFINITY, 300.0)]
    #[case(10.0, 40.0)]
    #[case(-5.0, 40.0)]
    #[case(f64::NEG_INFINITY, 40.0)]
    fn test_clamping(full_tokenizer: Tokenizer, #[case] value: f64, #[case] bound: f64) {
        assert_eq!(full_tokenizer.encode(value), full_tokenizer.encode(bound));
    }

    #[rstest]
    #[case(100.0, 63)]
    #[case(100.9, 63)]
    #[case(299.99, 262)]
    #[case(40.0, 3)]
    fn test_truncation(full_tokenizer: Tokenizer, #[case] value: f64, #[case] expected: u32) {
        assert_eq!(full_tokenizer.encode(value), expected);
    }

    #[rstest]
    fn test_numeric_text_is_parsed(full_tokenizer: Tokenizer) {
        assert_eq!(full_tokenizer.encode(" 180 "), 143);
        assert_eq!(full_tokenizer.encode("180.7"), 143);
    }

    #[rstest]
    fn test_integer_keys_are_second_choice() {
        let tokenizer = Tokenizer::from_vocab("../tests/data/cgm/vocab_pairs.json").unwrap();
        assert_eq!(tokenizer.get_unk_token_id(), 0);
        assert_eq!(tokenizer.get_cls_token_id(), 1);
        assert_eq!(tokenizer.get_pad_token_id(), 2);

        assert_eq!(tokenizer.encode(100), 4); // integer key only
        assert_eq!(tokenizer.encode(150), 6); // text key only
        assert_eq!(tokenizer.encode(1000), 5); // clamps to 300
        assert_eq!(tokenizer.encode(120), 0); // absent
    }

    #[rstest]
    fn test_sequence_length_and_prefix(full_tokenizer: Tokenizer) {
        for len in [0_usize, 1, 7, 288] {
            let readings: Vec<RawReading> =
                (0..len).map(|i| RawReading::from(60.0 + i as f64)).collect();
            let ids = full_tokenizer.encode_sequence(&readings);
            assert_eq!(ids.len(), len + 1);
            assert_eq!(ids[0], full_tokenizer.get_cls_token_id());
        }
    }

    #[rstest]
    fn test_every_id_is_known(full_tokenizer: Tokenizer) {
        let max_id = full_tokenizer.get_vocab().max_id().unwrap();
        let readings = vec![
            RawReading::from(-1e9),
            RawReading::from("12,5"),
            RawReading::Missing,
            RawReading::from(f64::MAX),
            RawReading::from(77.7),
        ];
        let ids = full_tokenizer.encode_sequence(&readings);
        assert!(ids.iter().all(|id| *id <= max_id));
    }

    #[rstest]
    fn test_encode_is_idempotent(full_tokenizer: Tokenizer) {
        let sample = RawSample::new(
            "P1",
            vec![RawReading::from(95.0), RawReading::Missing, "x".into()],
        )
        .with_label("label", "1");
        let labels = LabelBuilder::default();

        let first = full_tokenizer.encode_sample(&sample, &labels, 0).unwrap();
        let second = full_tokenizer.encode_sample(&sample, &labels, 0).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.input_ids, vec![2, 58, 1, 1]);
    }
}
