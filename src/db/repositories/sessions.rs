use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::{params, OptionalExtension, Row};

use crate::db::{
    connection::Database,
    helpers::{format_timestamp, parse_optional_timestamp, parse_quality, parse_timestamp},
    models::{SleepQuality, SleepSession, WindowAverages},
};

pub(super) fn row_to_session(row: &Row) -> Result<SleepSession> {
    let start_time: String = row.get("start_time")?;
    let end_time: Option<String> = row.get("end_time")?;
    let quality: Option<String> = row.get("quality")?;

    Ok(SleepSession {
        id: row.get("id")?,
        start_time: parse_timestamp(&start_time, "start_time")?,
        end_time: parse_optional_timestamp(end_time, "end_time")?,
        duration_minutes: row.get("duration_minutes")?,
        avg_temperature: row.get("avg_temperature")?,
        avg_light: row.get("avg_light")?,
        quality: quality.as_deref().map(parse_quality).transpose()?,
    })
}

impl Database {
    /// Opens a session at `start_time` unless one is already open. The check
    /// and the insert share a transaction so concurrent callers can never
    /// leave two open rows behind. Returns `None` when a session was already
    /// open.
    pub async fn open_session_if_none(
        &self,
        start_time: NaiveDateTime,
    ) -> Result<Option<SleepSession>> {
        self.execute(move |conn| {
            let tx = conn.transaction()?;

            let open_id: Option<i64> = tx
                .query_row(
                    "SELECT id FROM sleep_sessions WHERE end_time IS NULL LIMIT 1",
                    [],
                    |row| row.get(0),
                )
                .optional()?;
            if open_id.is_some() {
                return Ok(None);
            }

            tx.execute(
                "INSERT INTO sleep_sessions (start_time) VALUES (?1)",
                params![format_timestamp(&start_time)],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;

            Ok(Some(SleepSession {
                id,
                start_time,
                end_time: None,
                duration_minutes: None,
                avg_temperature: None,
                avg_light: None,
                quality: None,
            }))
        })
        .await
    }

    /// Finalizes the session in one transaction: re-checks it is still open,
    /// writes the aggregates and returns the closed row. `None` means some
    /// other caller finalized it first.
    pub async fn close_session_if_open(
        &self,
        session_id: i64,
        end_time: NaiveDateTime,
        duration_minutes: i64,
        averages: Option<WindowAverages>,
        quality: SleepQuality,
    ) -> Result<Option<SleepSession>> {
        self.execute(move |conn| {
            let tx = conn.transaction()?;

            let still_open: Option<i64> = tx
                .query_row(
                    "SELECT id FROM sleep_sessions WHERE id = ?1 AND end_time IS NULL",
                    params![session_id],
                    |row| row.get(0),
                )
                .optional()?;
            if still_open.is_none() {
                return Ok(None);
            }

            tx.execute(
                "UPDATE sleep_sessions
                 SET end_time = ?1,
                     duration_minutes = ?2,
                     avg_temperature = ?3,
                     avg_light = ?4,
                     quality = ?5
                 WHERE id = ?6",
                params![
                    format_timestamp(&end_time),
                    duration_minutes,
                    averages.map(|avg| avg.temperature),
                    averages.map(|avg| avg.light),
                    quality.as_str(),
                    session_id,
                ],
            )?;

            let session = tx.query_row(
                "SELECT id, start_time, end_time, duration_minutes, avg_temperature, avg_light, quality
                 FROM sleep_sessions
                 WHERE id = ?1",
                params![session_id],
                |row| Ok(row_to_session(row)),
            )??;
            tx.commit()?;

            Ok(Some(session))
        })
        .await
    }

    pub async fn get_open_session(&self) -> Result<Option<SleepSession>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, start_time, end_time, duration_minutes, avg_temperature, avg_light, quality
                 FROM sleep_sessions
                 WHERE end_time IS NULL
                 ORDER BY start_time DESC
                 LIMIT 1",
            )?;

            let mut rows = stmt.query([])?;
            let session = match rows.next()? {
                Some(row) => Some(row_to_session(row)?),
                None => None,
            };
            Ok(session)
        })
        .await
    }

    pub async fn get_session(&self, session_id: i64) -> Result<Option<SleepSession>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, start_time, end_time, duration_minutes, avg_temperature, avg_light, quality
                 FROM sleep_sessions
                 WHERE id = ?1",
            )?;

            let mut rows = stmt.query(params![session_id])?;
            let session = match rows.next()? {
                Some(row) => Some(row_to_session(row)?),
                None => None,
            };
            Ok(session)
        })
        .await
    }

    pub async fn count_open_sessions(&self) -> Result<i64> {
        self.execute(|conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM sleep_sessions WHERE end_time IS NULL",
                [],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
    }
}
