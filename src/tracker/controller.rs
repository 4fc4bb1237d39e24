//! Session lifecycle controller: every reading flows through here exactly
//! once, and this is the only code that opens or closes sleep sessions.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, bail, Result};
use chrono::{Duration, NaiveDateTime};
use log::{info, warn};
use tokio::sync::Mutex;

use crate::db::{
    helpers::current_timestamp,
    models::{
        OptimalConditions, Preferences, SensorReading, SessionSummary, SleepSession, SleepStats,
        StatusSnapshot,
    },
    Database,
};
use crate::metrics::{IngestMetrics, IngestSample};
use crate::scoring::{score_window, ScoringConfig};
use crate::tracker::state::{DetectorConfig, DetectorState, Transition};

/// How far the latest temperature may drift from `ideal_temp` (°C) and still
/// count as optimal.
pub const TEMP_TOLERANCE_C: f64 = 2.0;

/// Default lookback for history and stats queries.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// What one ingested reading did to the session lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    /// Detector state after the reading.
    pub sleeping: bool,
    /// Set when this reading opened a session.
    pub opened_session_id: Option<i64>,
    /// Set when this reading closed a session, carrying the finalized row.
    pub closed_session: Option<SleepSession>,
}

#[derive(Clone)]
pub struct SleepTracker {
    db: Database,
    state: Arc<Mutex<DetectorState>>,
    detector: DetectorConfig,
    scoring: ScoringConfig,
    metrics: IngestMetrics,
}

impl SleepTracker {
    pub fn new(db: Database) -> Self {
        Self::with_config(db, DetectorConfig::default(), ScoringConfig::default())
    }

    pub fn with_config(db: Database, detector: DetectorConfig, scoring: ScoringConfig) -> Self {
        Self {
            db,
            state: Arc::new(Mutex::new(DetectorState::NoActiveSession)),
            detector,
            scoring,
            metrics: IngestMetrics::new(),
        }
    }

    pub fn metrics(&self) -> &IngestMetrics {
        &self.metrics
    }

    /// Reloads the detector state from the store. Call once at startup: an
    /// open session left behind by a crash or restart is resumed, not
    /// abandoned, so the bed staying occupied across the restart still
    /// produces a single session.
    pub async fn recover(&self) -> Result<DetectorState> {
        let recovered = match self.db.get_open_session().await? {
            Some(session) => DetectorState::ActiveSession {
                session_id: session.id,
                start_time: session.start_time,
            },
            None => DetectorState::NoActiveSession,
        };

        let mut state = self.state.lock().await;
        *state = recovered;
        Ok(recovered)
    }

    /// Stores one reading stamped with the current wall clock and applies the
    /// detector transition it implies.
    pub async fn record_reading(
        &self,
        temperature: f64,
        light: f64,
        pressure: i64,
    ) -> Result<IngestOutcome> {
        self.record_reading_at(temperature, light, pressure, current_timestamp())
            .await
    }

    /// Same as [`record_reading`](Self::record_reading) with an explicit
    /// timestamp. Timestamps are expected to arrive in order; the detector
    /// does not reorder late samples.
    pub async fn record_reading_at(
        &self,
        temperature: f64,
        light: f64,
        pressure: i64,
        at: NaiveDateTime,
    ) -> Result<IngestOutcome> {
        let started = Instant::now();

        // Holding the state lock across the store writes serializes every
        // transition, which is what keeps the single-open-session invariant
        // safe without cross-process coordination.
        let mut state = self.state.lock().await;

        let reading = SensorReading::new(temperature, light, pressure, at);
        let store_started = Instant::now();
        self.db.insert_reading(&reading).await?;
        let store_ms = store_started.elapsed().as_millis() as u64;

        let outcome = match state.decide(pressure, &self.detector) {
            Transition::None => IngestOutcome {
                sleeping: state.is_active(),
                opened_session_id: None,
                closed_session: None,
            },
            Transition::OpenSession => self.open_session(&mut state, at).await?,
            Transition::CloseSession => self.close_session(&mut state, at).await?,
        };

        let sample = IngestSample {
            timestamp: at,
            store_ms,
            total_ms: started.elapsed().as_millis() as u64,
            opened_session: outcome.opened_session_id.is_some(),
            closed_session: outcome.closed_session.is_some(),
        };
        self.metrics.record_ingest(sample).await;

        Ok(outcome)
    }

    async fn open_session(
        &self,
        state: &mut DetectorState,
        at: NaiveDateTime,
    ) -> Result<IngestOutcome> {
        match self.db.open_session_if_none(at).await? {
            Some(session) => {
                info!("sleep session {} opened at {}", session.id, session.start_time);
                *state = DetectorState::ActiveSession {
                    session_id: session.id,
                    start_time: session.start_time,
                };
                Ok(IngestOutcome {
                    sleeping: true,
                    opened_session_id: Some(session.id),
                    closed_session: None,
                })
            }
            None => {
                // The store already had an open session this process did not
                // know about. Adopt it instead of stacking a second one.
                let existing = self
                    .db
                    .get_open_session()
                    .await?
                    .ok_or_else(|| anyhow!("open session disappeared during transition"))?;
                warn!(
                    "detector state lagged behind store; resuming session {}",
                    existing.id
                );
                *state = DetectorState::ActiveSession {
                    session_id: existing.id,
                    start_time: existing.start_time,
                };
                Ok(IngestOutcome {
                    sleeping: true,
                    opened_session_id: None,
                    closed_session: None,
                })
            }
        }
    }

    async fn close_session(
        &self,
        state: &mut DetectorState,
        at: NaiveDateTime,
    ) -> Result<IngestOutcome> {
        let DetectorState::ActiveSession {
            session_id,
            start_time,
        } = *state
        else {
            bail!("close requested without an active session");
        };

        let averages = self.db.average_conditions(start_time, at).await?;
        let exact_minutes = (at - start_time).num_seconds() as f64 / 60.0;
        let quality = score_window(averages.as_ref(), exact_minutes, &self.scoring);
        let duration_minutes = exact_minutes.round() as i64;

        let closed = self
            .db
            .close_session_if_open(session_id, at, duration_minutes, averages, quality)
            .await?;

        *state = DetectorState::NoActiveSession;

        match closed {
            Some(session) => {
                info!(
                    "sleep session {} closed after {} min, quality {}",
                    session.id,
                    duration_minutes,
                    quality.as_str()
                );
                Ok(IngestOutcome {
                    sleeping: false,
                    opened_session_id: None,
                    closed_session: Some(session),
                })
            }
            None => {
                warn!("session {session_id} was already finalized; state resynced");
                Ok(IngestOutcome {
                    sleeping: false,
                    opened_session_id: None,
                    closed_session: None,
                })
            }
        }
    }

    /// Latest reading combined with the detector state, `None` before any
    /// reading has been stored.
    pub async fn status(&self) -> Result<Option<StatusSnapshot>> {
        self.status_at(current_timestamp()).await
    }

    pub async fn status_at(&self, now: NaiveDateTime) -> Result<Option<StatusSnapshot>> {
        let Some(latest) = self.db.latest_reading().await? else {
            return Ok(None);
        };

        let state = self.state.lock().await;
        let current_sleep_duration = match *state {
            DetectorState::ActiveSession { start_time, .. } => {
                let minutes = (now - start_time).num_seconds() as f64 / 60.0;
                Some(minutes.round() as i64)
            }
            DetectorState::NoActiveSession => None,
        };

        Ok(Some(StatusSnapshot {
            temperature: latest.temperature,
            light: latest.light,
            pressure: latest.pressure,
            timestamp: latest.timestamp,
            sleeping: state.is_active(),
            current_sleep_duration,
        }))
    }

    /// Compares the latest reading with stored preferences, `None` when
    /// either is missing.
    pub async fn optimal_conditions(&self) -> Result<Option<OptimalConditions>> {
        let latest = self.db.latest_reading().await?;
        let prefs = self.db.get_preferences().await?;

        let (Some(reading), Some(prefs)) = (latest, prefs) else {
            return Ok(None);
        };
        Ok(Some(evaluate_optimality(&reading, &prefs)))
    }

    /// Finalized sessions from the last `days` days, newest first.
    pub async fn sleep_history(&self, days: i64) -> Result<Vec<SessionSummary>> {
        let cutoff = (current_timestamp() - Duration::days(days)).date();
        let sessions = self.db.finalized_sessions_since(cutoff).await?;
        Ok(sessions
            .iter()
            .filter_map(SessionSummary::from_session)
            .collect())
    }

    /// Daily and whole-window rollups over the last `days` days.
    pub async fn sleep_stats(&self, days: i64) -> Result<SleepStats> {
        let cutoff = (current_timestamp() - Duration::days(days)).date();
        self.db.sleep_stats_since(cutoff).await
    }
}

/// Pure optimality rule: temperature within [`TEMP_TOLERANCE_C`] of the ideal
/// and light at or below the configured ceiling.
pub fn evaluate_optimality(reading: &SensorReading, prefs: &Preferences) -> OptimalConditions {
    let temperature_optimal = (reading.temperature - prefs.ideal_temp).abs() <= TEMP_TOLERANCE_C;
    let light_optimal = reading.light <= prefs.max_light;
    OptimalConditions {
        temperature_optimal,
        light_optimal,
        overall_optimal: temperature_optimal && light_optimal,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn reading(temperature: f64, light: f64) -> SensorReading {
        SensorReading::new(
            temperature,
            light,
            0,
            NaiveDate::from_ymd_opt(2025, 3, 14)
                .unwrap()
                .and_hms_opt(21, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn optimality_tolerance_is_inclusive() {
        let prefs = Preferences::default();
        // ideal_temp 18.5, so 20.5 is exactly at the boundary.
        let verdict = evaluate_optimality(&reading(20.5, 5.0), &prefs);
        assert!(verdict.temperature_optimal);
        assert!(verdict.overall_optimal);

        let verdict = evaluate_optimality(&reading(20.51, 5.0), &prefs);
        assert!(!verdict.temperature_optimal);
        assert!(!verdict.overall_optimal);
    }

    #[test]
    fn light_ceiling_is_inclusive() {
        let prefs = Preferences::default();
        assert!(evaluate_optimality(&reading(18.5, 10.0), &prefs).light_optimal);
        assert!(!evaluate_optimality(&reading(18.5, 10.01), &prefs).light_optimal);
    }

    #[test]
    fn overall_requires_both_factors() {
        let prefs = Preferences::default();
        let verdict = evaluate_optimality(&reading(30.0, 5.0), &prefs);
        assert!(!verdict.temperature_optimal);
        assert!(verdict.light_optimal);
        assert!(!verdict.overall_optimal);
    }
}
