//! Demo data generator: a couple of weeks of plausible sleep history plus a
//! day of sensor readings, so a fresh install has something to show.

use anyhow::Result;
use chrono::{Duration, Timelike};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::db::{
    connection::Database,
    helpers::{current_timestamp, format_timestamp, round1},
    models::WindowAverages,
};
use crate::scoring::{score_session, ScoringConfig};

/// Row counts written by [`Database::seed_demo_history`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub sessions: usize,
    pub readings: usize,
}

impl Database {
    /// Inserts `days` finalized sessions (one per night, scored with the real
    /// scorer) and 24 hours of synthetic readings. Existing rows are left
    /// alone.
    pub async fn seed_demo_history(&self, days: i64) -> Result<SeedReport> {
        let scoring = ScoringConfig::default();
        let now = current_timestamp();

        self.execute(move |conn| {
            let mut rng = StdRng::from_entropy();
            let tx = conn.transaction()?;
            let mut report = SeedReport {
                sessions: 0,
                readings: 0,
            };

            for day in (1..=days).rev() {
                let night = now - Duration::days(day);
                let start = night
                    .date()
                    .and_hms_opt(rng.gen_range(21..=23), rng.gen_range(0..=59), 0)
                    .unwrap_or(night);

                let duration_hours: f64 = rng.gen_range(4.0..9.0);
                let end = start + Duration::seconds((duration_hours * 3600.0) as i64);
                let averages = WindowAverages {
                    temperature: round1(rng.gen_range(14.0..26.0)),
                    light: round1(rng.gen_range(0.0..60.0)),
                };
                let quality = score_session(&averages, duration_hours * 60.0, &scoring);

                tx.execute(
                    "INSERT INTO sleep_sessions
                     (start_time, end_time, duration_minutes, avg_temperature, avg_light, quality)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    rusqlite::params![
                        format_timestamp(&start),
                        format_timestamp(&end),
                        (duration_hours * 60.0).round() as i64,
                        averages.temperature,
                        averages.light,
                        quality.as_str(),
                    ],
                )?;
                report.sessions += 1;
            }

            // Hourly readings for the past day, tracking the day/night cycle.
            for hour in (1..=24).rev() {
                let at = now - Duration::hours(hour);
                let daytime = at.hour() >= 6 && at.hour() < 22;
                let (temperature, light, pressure) = if daytime {
                    (
                        rng.gen_range(20.0..25.0),
                        rng.gen_range(30.0..90.0),
                        rng.gen_range(0..=1),
                    )
                } else {
                    (
                        rng.gen_range(16.0..22.0),
                        rng.gen_range(0.0..15.0),
                        rng.gen_range(1..=5),
                    )
                };
                insert_seed_reading(&tx, &at, temperature, light, pressure)?;
                report.readings += 1;
            }

            // Denser coverage for the last hour, out of bed.
            for step in 0..12 {
                let at = now - Duration::minutes(60 - step * 5);
                insert_seed_reading(
                    &tx,
                    &at,
                    rng.gen_range(20.0..23.0),
                    rng.gen_range(40.0..70.0),
                    0,
                )?;
                report.readings += 1;
            }

            tx.commit()?;
            Ok(report)
        })
        .await
    }
}

fn insert_seed_reading(
    tx: &rusqlite::Transaction<'_>,
    at: &chrono::NaiveDateTime,
    temperature: f64,
    light: f64,
    pressure: i64,
) -> Result<()> {
    tx.execute(
        "INSERT INTO sensor_data (temperature, light, pressure, timestamp)
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![round1(temperature), round1(light), pressure, format_timestamp(at)],
    )?;
    Ok(())
}
