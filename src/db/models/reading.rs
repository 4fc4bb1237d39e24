use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::db::helpers::timestamp_serde;

/// One environmental sample reported by the bedroom device.
///
/// `pressure` comes from the mattress contact sensor and only matters
/// relative to the detector threshold; temperature is degrees Celsius and
/// light is the sensor's 0-100 relative scale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensorReading {
    /// Row id, `None` until the reading has been stored.
    pub id: Option<i64>,
    pub temperature: f64,
    pub light: f64,
    pub pressure: i64,
    #[serde(with = "timestamp_serde")]
    pub timestamp: NaiveDateTime,
}

impl SensorReading {
    pub fn new(temperature: f64, light: f64, pressure: i64, timestamp: NaiveDateTime) -> Self {
        Self {
            id: None,
            temperature,
            light,
            pressure,
            timestamp,
        }
    }
}

/// Mean temperature and light over a window of readings.
///
/// Produced by the readings repository for a closed session's
/// `[start_time, end_time]` window; absent when the window held no readings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WindowAverages {
    pub temperature: f64,
    pub light: f64,
}
