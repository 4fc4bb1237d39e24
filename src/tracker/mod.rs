//! Occupancy detection and the session lifecycle.

pub mod controller;
pub mod state;

pub use controller::{
    evaluate_optimality, IngestOutcome, SleepTracker, DEFAULT_WINDOW_DAYS, TEMP_TOLERANCE_C,
};
pub use state::{DetectorConfig, DetectorState, Transition};
