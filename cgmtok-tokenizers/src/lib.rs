//! # cgmtok-tokenizers
//!
//! Tokenizers that turn continuous glucose monitoring readings into model input ids.
//!
//! ## Purpose
//!
//! A sequence model does not see glucose concentrations, it sees integer ids. This crate owns
//! that mapping: the persisted [`Vocabulary`] (value → id), the special tokens the model
//! reserves, and the [`Tokenizer`] that encodes a day of readings into one sequence.
//!
//! ## Main Components
//!
//! - **`Vocabulary`**: the value → id table and its special-token entries
//! - **`Tokenizer`**: clamps, truncates and looks up readings, prepending the class-start id
//! - **`LabelBuilder`**: turns the label columns of a row into a single class id or a
//!   multi-hot vector, following the versioned column [`schema`]
//!
//! ## Example
//!
//! ```rust
//! use cgmtok_core::models::RawReading;
//! use cgmtok_tokenizers::Tokenizer;
//!
//! let tokenizer = Tokenizer::from_vocab("../tests/data/cgm/vocab_small.json").unwrap();
//!
//! let readings = vec![
//!     RawReading::from(100.0),
//!     RawReading::Missing,
//!     RawReading::from(500.0),
//! ];
//! let ids = tokenizer.encode_sequence(&readings);
//! assert_eq!(ids, vec![1, 0, 0, 6]);
//! ```
//!
pub mod config;
pub mod encoding;
pub mod error;
pub mod labels;
pub mod schema;
pub mod tokenizer;
pub mod utils;
pub mod vocab;

// re-export things
pub use config::TaskKind;
pub use encoding::*;
pub use error::*;
pub use labels::*;
pub use tokenizer::*;
pub use vocab::*;

// contants
pub mod consts {
    pub const DEFAULT_CLAMP_MIN: f64 = 40.0;
    pub const DEFAULT_CLAMP_MAX: f64 = 300.0;
    /// Id used for a special-token role that no alias resolved.
    pub const UNRESOLVED_SPECIAL_TOKEN_ID: u32 = 0;
}
