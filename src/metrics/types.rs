use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::db::helpers::timestamp_serde;

/// Timing record for one ingested reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestSample {
    #[serde(with = "timestamp_serde")]
    pub timestamp: NaiveDateTime,
    /// Time spent writing the reading to the store.
    pub store_ms: u64,
    /// End-to-end time including any session transition.
    pub total_ms: u64,
    pub opened_session: bool,
    pub closed_session: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemMetrics {
    pub cpu_percent: f32,
    pub memory_mb: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub system: SystemMetrics,
    pub recent_ingests: Vec<IngestSample>,
    pub ingest_count: u64,
    pub session_open_count: u64,
    pub session_close_count: u64,
    pub error_count: u64,
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self {
            system: SystemMetrics {
                cpu_percent: 0.0,
                memory_mb: 0.0,
            },
            recent_ingests: Vec::new(),
            ingest_count: 0,
            session_open_count: 0,
            session_close_count: 0,
            error_count: 0,
        }
    }
}
