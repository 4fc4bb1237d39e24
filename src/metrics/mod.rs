//! Lightweight ingest instrumentation: per-reading timings, lifecycle
//! counters and process CPU/RSS, kept in memory for the heartbeat log.

mod types;

pub use types::{IngestSample, MetricsSnapshot, SystemMetrics};

use std::sync::Arc;
use sysinfo::{Pid, ProcessesToUpdate, System};
use tokio::sync::Mutex;

const MAX_RECENT_INGESTS: usize = 20;

pub struct IngestMetrics {
    inner: Arc<Mutex<MetricsState>>,
}

struct MetricsState {
    recent_ingests: Vec<IngestSample>,
    ingest_count: u64,
    session_open_count: u64,
    session_close_count: u64,
    error_count: u64,
    system: System,
    pid: Pid,
}

impl IngestMetrics {
    pub fn new() -> Self {
        let mut system = System::new();
        let pid = Pid::from_u32(std::process::id());

        // Initial refresh to establish baseline for CPU calculation
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]));

        Self {
            inner: Arc::new(Mutex::new(MetricsState {
                recent_ingests: Vec::with_capacity(MAX_RECENT_INGESTS),
                ingest_count: 0,
                session_open_count: 0,
                session_close_count: 0,
                error_count: 0,
                system,
                pid,
            })),
        }
    }

    pub async fn record_ingest(&self, sample: IngestSample) {
        let mut state = self.inner.lock().await;

        state.ingest_count += 1;
        if sample.opened_session {
            state.session_open_count += 1;
        }
        if sample.closed_session {
            state.session_close_count += 1;
        }

        state.recent_ingests.push(sample);

        if state.recent_ingests.len() > MAX_RECENT_INGESTS {
            state.recent_ingests.remove(0);
        }
    }

    /// Counts an ingest attempt that never produced a stored reading, e.g. a
    /// malformed device line or a store failure.
    pub async fn record_error(&self) {
        let mut state = self.inner.lock().await;
        state.error_count += 1;
    }

    pub async fn get_snapshot(&self) -> MetricsSnapshot {
        let mut state = self.inner.lock().await;
        let pid = state.pid;

        // Refresh to get current CPU/RAM
        state.system.refresh_processes(ProcessesToUpdate::Some(&[pid]));

        let system_metrics = if let Some(process) = state.system.process(pid) {
            SystemMetrics {
                cpu_percent: process.cpu_usage(),
                memory_mb: process.memory() as f64 / 1024.0 / 1024.0,
            }
        } else {
            SystemMetrics {
                cpu_percent: 0.0,
                memory_mb: 0.0,
            }
        };

        MetricsSnapshot {
            system: system_metrics,
            recent_ingests: state.recent_ingests.clone(),
            ingest_count: state.ingest_count,
            session_open_count: state.session_open_count,
            session_close_count: state.session_close_count,
            error_count: state.error_count,
        }
    }
}

impl Clone for IngestMetrics {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for IngestMetrics {
    fn default() -> Self {
        Self::new()
    }
}
