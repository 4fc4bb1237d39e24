use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Cadences for the device ingest loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestSettings {
    /// Seconds between device polls.
    pub poll_interval_secs: u64,
    /// Seconds between preference pushes to the device.
    pub prefs_push_interval_secs: u64,
    /// Run against the simulated device instead of the stdin bridge.
    pub demo_mode: bool,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: 1,
            prefs_push_interval_secs: 10,
            demo_mode: true,
        }
    }
}

/// Process-level settings, read once at startup from a JSON file. A missing
/// or unreadable file falls back to defaults so a bare checkout still runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    data_dir: Option<PathBuf>,
    #[serde(default)]
    pub ingest: IngestSettings,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        Ok(serde_json::from_str(&contents).unwrap_or_default())
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("./data"))
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join("drowse.sqlite3")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/drowse-settings.json")).unwrap();
        assert_eq!(settings.ingest.poll_interval_secs, 1);
        assert_eq!(settings.ingest.prefs_push_interval_secs, 10);
        assert!(settings.ingest.demo_mode);
        assert_eq!(settings.database_path(), PathBuf::from("./data/drowse.sqlite3"));
    }

    #[test]
    fn partial_settings_fill_in_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"data_dir": "/tmp/drowse"}"#).unwrap();
        assert_eq!(settings.data_dir(), PathBuf::from("/tmp/drowse"));
        assert_eq!(settings.ingest.poll_interval_secs, 1);
    }
}
