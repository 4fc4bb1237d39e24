use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::db::helpers::timestamp_serde;

/// The latest reading combined with the live detector state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusSnapshot {
    pub temperature: f64,
    pub light: f64,
    pub pressure: i64,
    #[serde(with = "timestamp_serde")]
    pub timestamp: NaiveDateTime,
    pub sleeping: bool,
    /// Minutes since the open session started; omitted while awake.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_sleep_duration: Option<i64>,
}

/// Verdict comparing the latest reading against stored preferences.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptimalConditions {
    pub temperature_optimal: bool,
    pub light_optimal: bool,
    pub overall_optimal: bool,
}
