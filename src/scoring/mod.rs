//! Sleep quality scoring over a closed session's aggregates.

pub mod config;
pub mod quality;

pub use config::ScoringConfig;
pub use quality::{score_session, score_window};
