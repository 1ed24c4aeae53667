//! # cgmtok-sim
//!
//! Generates synthetic CGM tables in the same shape as real exports, so the
//! prepare/inspect pipeline can be exercised without patient data.
//!
//! ```rust
//! use cgmtok_sim::{generate_glucose_profile, seeded_rng};
//!
//! let mut rng = seeded_rng(Some(42));
//! let profile = generate_glucose_profile(true, &mut rng).unwrap();
//!
//! assert_eq!(profile.len(), 288);
//! assert!(profile.iter().all(|g| (40..=400).contains(g)));
//! ```
//!
pub mod error;
pub mod profile;
pub mod tables;

pub use error::*;
pub use profile::*;
pub use tables::*;

pub mod consts {
    /// Meal times, in hours since midnight.
    pub const MEAL_TIMES: [f64; 3] = [8.0, 12.0, 18.0];
    pub const NOISE_STD: f64 = 5.0;
    pub const GLUCOSE_FLOOR: f64 = 40.0;
    pub const GLUCOSE_CEILING: f64 = 400.0;

    /// Rows labelled diabetic at the head of a single-label table.
    pub const DIABETIC_ROWS: usize = 3;
    pub const PATIENT_ID_OFFSET: usize = 100;

    /// Multi-label rows draw flat readings from this range.
    pub const MULTI_LABEL_READING_MIN: i64 = 80;
    pub const MULTI_LABEL_READING_MAX: i64 = 180;
}
