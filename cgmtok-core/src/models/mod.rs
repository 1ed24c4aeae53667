pub mod reading;
pub mod sample;

// re-export for cleaner imports
pub use self::reading::RawReading;
pub use self::sample::RawSample;
