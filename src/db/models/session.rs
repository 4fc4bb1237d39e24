use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::db::helpers::{round1, timestamp_serde, timestamp_serde_opt};

/// Quality label assigned when a session closes.
///
/// `Unknown` means the session window held no readings to average, so the
/// scorer had nothing to work with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SleepQuality {
    Excellent,
    Good,
    Fair,
    Poor,
    Unknown,
}

impl SleepQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            SleepQuality::Excellent => "Excellent",
            SleepQuality::Good => "Good",
            SleepQuality::Fair => "Fair",
            SleepQuality::Poor => "Poor",
            SleepQuality::Unknown => "Unknown",
        }
    }
}

/// A period spent in bed, detected from mattress pressure.
///
/// Open sessions carry only `start_time`; the aggregate columns are filled in
/// once when the session closes and never rewritten afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SleepSession {
    pub id: i64,
    #[serde(with = "timestamp_serde")]
    pub start_time: NaiveDateTime,
    #[serde(with = "timestamp_serde_opt")]
    pub end_time: Option<NaiveDateTime>,
    pub duration_minutes: Option<i64>,
    pub avg_temperature: Option<f64>,
    pub avg_light: Option<f64>,
    pub quality: Option<SleepQuality>,
}

impl SleepSession {
    pub fn is_finalized(&self) -> bool {
        self.end_time.is_some()
    }
}

/// One row of the sleep history listing, shaped for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSummary {
    /// Calendar date the session started on, `YYYY-MM-DD`.
    pub date: String,
    /// Clock time the session started, `HH:MM`.
    pub start_time: String,
    /// Clock time the session ended, `HH:MM`.
    pub end_time: String,
    /// Duration in hours, one decimal.
    pub hours: f64,
    pub temp: Option<f64>,
    pub light: Option<f64>,
    pub quality: SleepQuality,
}

impl SessionSummary {
    /// Summarizes a finalized session; `None` while the session is open.
    pub fn from_session(session: &SleepSession) -> Option<Self> {
        let end_time = session.end_time?;
        let minutes = session.duration_minutes.unwrap_or(0);
        Some(Self {
            date: session.start_time.format("%Y-%m-%d").to_string(),
            start_time: session.start_time.format("%H:%M").to_string(),
            end_time: end_time.format("%H:%M").to_string(),
            hours: round1(minutes as f64 / 60.0),
            temp: session.avg_temperature,
            light: session.avg_light,
            quality: session.quality.unwrap_or(SleepQuality::Unknown),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn finalized_session() -> SleepSession {
        let start = NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(23, 5, 0)
            .unwrap();
        SleepSession {
            id: 7,
            start_time: start,
            end_time: Some(start + chrono::Duration::minutes(455)),
            duration_minutes: Some(455),
            avg_temperature: Some(19.2),
            avg_light: Some(4.5),
            quality: Some(SleepQuality::Excellent),
        }
    }

    #[test]
    fn summary_formats_date_and_clock_times() {
        let summary = SessionSummary::from_session(&finalized_session()).unwrap();
        assert_eq!(summary.date, "2025-03-14");
        assert_eq!(summary.start_time, "23:05");
        assert_eq!(summary.end_time, "06:40");
        assert_eq!(summary.hours, 7.6);
        assert_eq!(summary.quality, SleepQuality::Excellent);
    }

    #[test]
    fn summary_skips_open_sessions() {
        let mut session = finalized_session();
        session.end_time = None;
        assert!(SessionSummary::from_session(&session).is_none());
    }

    #[test]
    fn summary_defaults_missing_aggregates() {
        let mut session = finalized_session();
        session.duration_minutes = None;
        session.avg_temperature = None;
        session.avg_light = None;
        session.quality = None;
        let summary = SessionSummary::from_session(&session).unwrap();
        assert_eq!(summary.hours, 0.0);
        assert_eq!(summary.temp, None);
        assert_eq!(summary.quality, SleepQuality::Unknown);
    }
}
