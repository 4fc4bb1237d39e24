use anyhow::{anyhow, Result};
use rusqlite::{params, Row};

use crate::db::{
    connection::Database,
    models::{preferences::validation, Preferences},
};

fn row_to_preferences(row: &Row) -> Result<Preferences> {
    Ok(Preferences {
        ideal_temp: row.get("ideal_temp")?,
        max_light: row.get("max_light")?,
        adaptive_light: row.get("adaptive_light")?,
        auto_temp: row.get("auto_temp")?,
        sleep_notifications: row.get("sleep_notifications")?,
        sound_id: row.get("sound_id")?,
        sound_duration: row.get("sound_duration")?,
    })
}

impl Database {
    /// The stored preference row. `None` only on a store that was never
    /// migrated, since the schema seeds defaults.
    pub async fn get_preferences(&self) -> Result<Option<Preferences>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT ideal_temp, max_light, adaptive_light, auto_temp,
                        sleep_notifications, sound_id, sound_duration
                 FROM user_preferences
                 ORDER BY id DESC
                 LIMIT 1",
            )?;

            let mut rows = stmt.query([])?;
            let prefs = match rows.next()? {
                Some(row) => Some(row_to_preferences(row)?),
                None => None,
            };
            Ok(prefs)
        })
        .await
    }

    /// Last-writer-wins update of the environment half of the preferences.
    pub async fn update_environment_preferences(
        &self,
        ideal_temp: f64,
        max_light: f64,
        adaptive_light: bool,
        auto_temp: bool,
        sleep_notifications: bool,
    ) -> Result<()> {
        validation::validate_environment(ideal_temp, max_light)?;
        self.execute(move |conn| {
            let updated = conn.execute(
                "UPDATE user_preferences
                 SET ideal_temp = ?1,
                     max_light = ?2,
                     adaptive_light = ?3,
                     auto_temp = ?4,
                     sleep_notifications = ?5
                 WHERE id = (SELECT id FROM user_preferences ORDER BY id DESC LIMIT 1)",
                params![
                    ideal_temp,
                    max_light,
                    adaptive_light,
                    auto_temp,
                    sleep_notifications,
                ],
            )?;

            if updated == 0 {
                return Err(anyhow!("preferences row missing"));
            }
            Ok(())
        })
        .await
    }

    pub async fn update_sound_preferences(
        &self,
        sound_id: &str,
        sound_duration: i64,
    ) -> Result<()> {
        validation::validate_sound(sound_id, sound_duration)?;
        let sound_id = sound_id.to_string();
        self.execute(move |conn| {
            let updated = conn.execute(
                "UPDATE user_preferences
                 SET sound_id = ?1,
                     sound_duration = ?2
                 WHERE id = (SELECT id FROM user_preferences ORDER BY id DESC LIMIT 1)",
                params![sound_id, sound_duration],
            )?;

            if updated == 0 {
                return Err(anyhow!("preferences row missing"));
            }
            Ok(())
        })
        .await
    }
}
