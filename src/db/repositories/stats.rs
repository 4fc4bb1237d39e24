use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::params;

use crate::db::{
    connection::Database,
    helpers::round1,
    models::{DailySleepStats, SleepSession, SleepStats, WeeklySleepStats},
};

// Session timestamps are stored as "YYYY-MM-DD HH:MM:SS", so a bare
// "YYYY-MM-DD" cutoff compares correctly against them lexically.
fn cutoff_string(cutoff: NaiveDate) -> String {
    cutoff.format("%Y-%m-%d").to_string()
}

impl Database {
    /// Finalized sessions starting on or after `cutoff`, newest first.
    pub async fn finalized_sessions_since(
        &self,
        cutoff: NaiveDate,
    ) -> Result<Vec<SleepSession>> {
        let cutoff = cutoff_string(cutoff);
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, start_time, end_time, duration_minutes, avg_temperature, avg_light, quality
                 FROM sleep_sessions
                 WHERE end_time IS NOT NULL AND start_time >= ?1
                 ORDER BY start_time DESC",
            )?;

            let mut rows = stmt.query(params![cutoff])?;
            let mut sessions = Vec::new();
            while let Some(row) = rows.next()? {
                sessions.push(super::sessions::row_to_session(row)?);
            }

            Ok(sessions)
        })
        .await
    }

    /// Daily totals plus the whole-window aggregate over finalized sessions
    /// starting on or after `cutoff`. An empty window produces an empty daily
    /// list and a zeroed aggregate.
    pub async fn sleep_stats_since(&self, cutoff: NaiveDate) -> Result<SleepStats> {
        let cutoff = cutoff_string(cutoff);
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT date(start_time) AS day,
                        SUM(duration_minutes) / 60.0 AS total_hours,
                        AVG(avg_temperature) AS mean_temp,
                        AVG(avg_light) AS mean_light
                 FROM sleep_sessions
                 WHERE end_time IS NOT NULL AND start_time >= ?1
                 GROUP BY day
                 ORDER BY day ASC",
            )?;

            let mut rows = stmt.query(params![cutoff.clone()])?;
            let mut daily = Vec::new();
            while let Some(row) = rows.next()? {
                let hours: Option<f64> = row.get("total_hours")?;
                let temp: Option<f64> = row.get("mean_temp")?;
                let light: Option<f64> = row.get("mean_light")?;
                daily.push(DailySleepStats {
                    date: row.get("day")?,
                    hours: round1(hours.unwrap_or(0.0)),
                    temp: round1(temp.unwrap_or(0.0)),
                    light: round1(light.unwrap_or(0.0)),
                });
            }

            let weekly = conn.query_row(
                "SELECT AVG(duration_minutes) / 60.0,
                        AVG(avg_temperature),
                        AVG(avg_light),
                        COUNT(*)
                 FROM sleep_sessions
                 WHERE end_time IS NOT NULL AND start_time >= ?1",
                params![cutoff],
                |row| {
                    let avg_hours: Option<f64> = row.get(0)?;
                    let avg_temp: Option<f64> = row.get(1)?;
                    let avg_light: Option<f64> = row.get(2)?;
                    let session_count: i64 = row.get(3)?;
                    Ok(WeeklySleepStats {
                        avg_hours: round1(avg_hours.unwrap_or(0.0)),
                        avg_temp: round1(avg_temp.unwrap_or(0.0)),
                        avg_light: round1(avg_light.unwrap_or(0.0)),
                        session_count,
                    })
                },
            )?;

            Ok(SleepStats { daily, weekly })
        })
        .await
    }
}
