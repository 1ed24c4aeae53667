//! # Input/Output utilities for encoded CGM datasets.
//!
//! This small crate turns raw samples into an encoded dataset and saves it to disk. The on-disk
//! layout is a directory holding one Arrow IPC stream plus two JSON metadata files, the same
//! shape a Hugging Face `save_to_disk` call produces, so the training framework can load it
//! directly.
//!
pub mod consts;
pub mod dataset;
pub mod error;
pub mod metadata;

// re-expose core functions
pub use consts::*;
pub use dataset::*;
pub use error::*;
