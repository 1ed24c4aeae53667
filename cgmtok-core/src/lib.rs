//! # cgmtok-core
//!
//! Shared models and readers for the cgmtok workspace.
//!
//! A continuous glucose monitor produces one reading every five minutes, so a day of data is a
//! row of 288 values. This crate holds the types every other crate agrees on: a single
//! [`RawReading`](models::RawReading) (which may be missing or malformed), a
//! [`RawSample`](models::RawSample) (one table row), and the reader that turns a delimited
//! table into samples.
//!
//! ## Example
//!
//! ```rust
//! use cgmtok_core::models::RawReading;
//!
//! assert_eq!(RawReading::from_cell("123.4"), RawReading::Numeric(123.4));
//! assert_eq!(RawReading::from_cell(""), RawReading::Missing);
//! assert_eq!(RawReading::from_cell("n/a"), RawReading::Missing);
//! ```
//!
pub mod errors;
pub mod models;
pub mod table;
pub mod utils;

pub mod consts {
    /// Readings per sample: one every 5 minutes over 24 hours.
    pub const READINGS_PER_DAY: usize = 288;
    pub const DEFAULT_ID_COLUMN: &str = "id";
    pub const READING_COLUMN_PREFIX: &str = "g_";
}
