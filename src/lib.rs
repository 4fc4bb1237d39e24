//! Smart bedroom sleep tracking daemon.
//!
//! Ingests temperature, light, and pressure readings from a bedside device,
//! detects sleep sessions from bed pressure, scores each session against
//! preferred ranges, and persists everything to SQLite for later queries.

pub mod db;
pub mod device;
pub mod metrics;
pub mod scoring;
pub mod settings;
pub mod tracker;
mod utils;

pub use db::{Database, SeedReport};
pub use settings::{IngestSettings, Settings};
pub use tracker::{IngestOutcome, SleepTracker};
