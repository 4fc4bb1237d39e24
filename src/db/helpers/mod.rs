use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDateTime, Timelike};

use crate::db::models::SleepQuality;

/// Storage representation of every timestamp, e.g. `2025-03-14 22:41:07`.
/// Readings and session bounds are compared lexically in SQL, so the format
/// must stay zero-padded and fixed-width.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(value: &str, field: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .with_context(|| format!("failed to parse {field} value {value:?}"))
}

pub fn parse_optional_timestamp(
    value: Option<String>,
    field: &str,
) -> Result<Option<NaiveDateTime>> {
    match value {
        Some(raw) => parse_timestamp(&raw, field).map(Some),
        None => Ok(None),
    }
}

/// Local wall-clock time truncated to whole seconds, matching what the
/// storage format can represent.
pub fn current_timestamp() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

pub fn parse_quality(value: &str) -> Result<SleepQuality> {
    match value {
        "Excellent" => Ok(SleepQuality::Excellent),
        "Good" => Ok(SleepQuality::Good),
        "Fair" => Ok(SleepQuality::Fair),
        "Poor" => Ok(SleepQuality::Poor),
        "Unknown" => Ok(SleepQuality::Unknown),
        other => Err(anyhow!("unknown sleep quality {other}")),
    }
}

/// Rounds to one decimal place, the precision reported for averaged
/// temperatures, light levels and hour totals.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Serde adapter keeping JSON timestamps in the storage format.
pub mod timestamp_serde {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Same as [`timestamp_serde`] for optional timestamps.
pub mod timestamp_serde_opt {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_some(&ts.format(TIMESTAMP_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|value| {
            NaiveDateTime::parse_from_str(&value, TIMESTAMP_FORMAT)
                .map_err(serde::de::Error::custom)
        })
        .transpose()
    }
}
