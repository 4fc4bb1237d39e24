use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};

use crate::db::{
    connection::Database,
    helpers::{format_timestamp, parse_timestamp},
    models::{SensorReading, WindowAverages},
};

fn row_to_reading(row: &Row) -> Result<SensorReading> {
    let timestamp: String = row.get("timestamp")?;

    Ok(SensorReading {
        id: row.get("id")?,
        temperature: row.get("temperature")?,
        light: row.get("light")?,
        pressure: row.get("pressure")?,
        timestamp: parse_timestamp(&timestamp, "timestamp")?,
    })
}

/// Mean temperature and light over `[start, end]` inclusive, or `None` when
/// the window holds no readings.
fn window_averages(
    conn: &Connection,
    start: &NaiveDateTime,
    end: &NaiveDateTime,
) -> Result<Option<WindowAverages>> {
    let (temperature, light): (Option<f64>, Option<f64>) = conn.query_row(
        "SELECT AVG(temperature), AVG(light)
         FROM sensor_data
         WHERE timestamp BETWEEN ?1 AND ?2",
        params![format_timestamp(start), format_timestamp(end)],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    match (temperature, light) {
        (Some(temperature), Some(light)) => Ok(Some(WindowAverages { temperature, light })),
        _ => Ok(None),
    }
}

impl Database {
    pub async fn insert_reading(&self, reading: &SensorReading) -> Result<i64> {
        let record = reading.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO sensor_data (temperature, light, pressure, timestamp)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    record.temperature,
                    record.light,
                    record.pressure,
                    format_timestamp(&record.timestamp),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
    }

    pub async fn latest_reading(&self) -> Result<Option<SensorReading>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, temperature, light, pressure, timestamp
                 FROM sensor_data
                 ORDER BY id DESC
                 LIMIT 1",
            )?;

            let mut rows = stmt.query([])?;
            let reading = match rows.next()? {
                Some(row) => Some(row_to_reading(row)?),
                None => None,
            };
            Ok(reading)
        })
        .await
    }

    pub async fn readings_in_window(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<SensorReading>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, temperature, light, pressure, timestamp
                 FROM sensor_data
                 WHERE timestamp BETWEEN ?1 AND ?2
                 ORDER BY timestamp ASC",
            )?;

            let mut rows = stmt.query(params![format_timestamp(&start), format_timestamp(&end)])?;
            let mut readings = Vec::new();
            while let Some(row) = rows.next()? {
                readings.push(row_to_reading(row)?);
            }

            Ok(readings)
        })
        .await
    }

    /// Mean temperature and light over the window, `None` when no readings
    /// fall inside it.
    pub async fn average_conditions(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Option<WindowAverages>> {
        self.execute(move |conn| window_averages(conn, &start, &end)).await
    }

    pub async fn count_readings(&self) -> Result<i64> {
        self.execute(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM sensor_data", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
    }
}
