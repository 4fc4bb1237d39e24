use anyhow::{Context, Result};
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::db::Database;
use crate::device::source::DeviceSource;
use crate::device::wire;
use crate::settings::IngestSettings;
use crate::tracker::SleepTracker;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

// Import the logging macros (exported at crate root)
use crate::{log_error, log_info, log_warn};

const INGEST_TIMEOUT_SECS: u64 = 10;

/// Drives one device: polls it on the reading cadence, feeds samples to the
/// tracker and periodically pushes stored preferences back down the wire.
pub async fn ingest_loop<S: DeviceSource>(
    mut source: S,
    tracker: SleepTracker,
    db: Database,
    settings: IngestSettings,
    cancel_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(Duration::from_secs(settings.poll_interval_secs.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut prefs_ticker =
        tokio::time::interval(Duration::from_secs(settings.prefs_push_interval_secs.max(1)));
    prefs_ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let fut = ingest_once(&mut source, &tracker);
                match tokio::time::timeout(Duration::from_secs(INGEST_TIMEOUT_SECS), fut).await {
                    Ok(Ok(())) => {},
                    Ok(Err(err)) => {
                        tracker.metrics().record_error().await;
                        log_error!("reading ingest failed: {err:?}");
                    }
                    Err(_) => {
                        tracker.metrics().record_error().await;
                        log_warn!("reading ingest timeout (> {INGEST_TIMEOUT_SECS}s)");
                    }
                }
            }
            _ = prefs_ticker.tick() => {
                if let Err(err) = push_preferences(&mut source, &db).await {
                    log_warn!("preference push failed: {err:?}");
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("ingest loop shutting down");
                break;
            }
        }
    }
}

async fn ingest_once<S: DeviceSource>(source: &mut S, tracker: &SleepTracker) -> Result<()> {
    let Some(raw) = source.poll().await.context("device poll failed")? else {
        return Ok(());
    };

    let outcome = tracker
        .record_reading(raw.temperature, raw.light, raw.pressure)
        .await
        .context("failed to record reading")?;

    if let Some(session_id) = outcome.opened_session_id {
        log_info!("bed occupied, tracking session {session_id}");
    }
    if let Some(session) = &outcome.closed_session {
        log_info!(
            "bed vacated, session {} finalized ({} min, quality {})",
            session.id,
            session.duration_minutes.unwrap_or(0),
            session.quality.map(|q| q.as_str()).unwrap_or("Unknown"),
        );
    }

    Ok(())
}

async fn push_preferences<S: DeviceSource>(source: &mut S, db: &Database) -> Result<()> {
    let Some(prefs) = db.get_preferences().await? else {
        log_warn!("no stored preferences to push");
        return Ok(());
    };

    let command = wire::encode_prefs_command(&prefs);
    source
        .push_preferences(&command)
        .await
        .context("device rejected preference command")?;
    log_info!("pushed preferences to device: {}", command.trim_end());
    Ok(())
}
