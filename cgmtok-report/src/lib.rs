//! # cgmtok-report
//!
//! Post-hoc analysis of a CGM classifier's predictions.
//!
//! The training framework writes a `predictions.json` artifact holding raw logits and,
//! optionally, the ground-truth labels. This crate finds the newest artifact under an output
//! root, converts logits into probabilities (softmax for single-label tasks, sigmoid with a
//! 0.5 threshold for multi-label tasks), prints a short summary and writes a CSV next to the
//! artifact.
//!
pub mod consts;
pub mod error;
pub mod files;
pub mod math;
pub mod multi;
pub mod predictions;
pub mod single;

// re-exports
pub use error::*;
pub use files::*;
pub use math::*;
pub use multi::*;
pub use predictions::*;
pub use single::*;
