use serde::{Deserialize, Serialize};

/// Hours and average conditions for one calendar day of finalized sessions.
///
/// `temp` and `light` fall back to zero when none of the day's sessions
/// recorded averages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySleepStats {
    /// Calendar date of the session starts, `YYYY-MM-DD`.
    pub date: String,
    /// Total hours slept that day, one decimal.
    pub hours: f64,
    pub temp: f64,
    pub light: f64,
}

/// Aggregate over every finalized session in the reporting window.
///
/// All fields are zero when the window holds no sessions, so callers never
/// have to special-case an empty store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklySleepStats {
    pub avg_hours: f64,
    pub avg_temp: f64,
    pub avg_light: f64,
    pub session_count: i64,
}

impl Default for WeeklySleepStats {
    fn default() -> Self {
        Self {
            avg_hours: 0.0,
            avg_temp: 0.0,
            avg_light: 0.0,
            session_count: 0,
        }
    }
}

/// Daily breakdown plus the whole-window aggregate, as one payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SleepStats {
    pub daily: Vec<DailySleepStats>,
    pub weekly: WeeklySleepStats,
}
