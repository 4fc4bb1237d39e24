use serde::{Deserialize, Serialize};

/// Comfort and sound preferences, stored as a single row.
///
/// `ideal_temp` and `max_light` drive the optimality check and are pushed to
/// the device; the rest configure device-side behavior only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preferences {
    pub ideal_temp: f64,
    pub max_light: f64,
    pub adaptive_light: bool,
    pub auto_temp: bool,
    pub sleep_notifications: bool,
    pub sound_id: String,
    pub sound_duration: i64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            ideal_temp: 18.5,
            max_light: 10.0,
            adaptive_light: true,
            auto_temp: true,
            sleep_notifications: true,
            sound_id: "white-noise".to_string(),
            sound_duration: 30,
        }
    }
}

/// Validation functions for preference updates
pub mod validation {
    use anyhow::{bail, Result};

    const MIN_IDEAL_TEMP: f64 = 0.0;
    const MAX_IDEAL_TEMP: f64 = 40.0;
    const MAX_SOUND_DURATION_MINUTES: i64 = 480;

    pub fn validate_environment(ideal_temp: f64, max_light: f64) -> Result<()> {
        if !ideal_temp.is_finite() || ideal_temp < MIN_IDEAL_TEMP || ideal_temp > MAX_IDEAL_TEMP {
            bail!("Invalid ideal temperature. Must be between 0 and 40");
        }
        if !max_light.is_finite() || max_light < 0.0 {
            bail!("Invalid max light. Must be a non-negative number");
        }
        Ok(())
    }

    pub fn validate_sound(sound_id: &str, sound_duration: i64) -> Result<()> {
        if sound_id.trim().is_empty() {
            bail!("Invalid sound id. Must not be empty");
        }
        if sound_duration <= 0 || sound_duration > MAX_SOUND_DURATION_MINUTES {
            bail!("Invalid sound duration. Must be between 1 and 480 minutes");
        }
        Ok(())
    }
}
