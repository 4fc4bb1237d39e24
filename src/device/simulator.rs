//! Synthetic device for demo installs: follows the real device's day/night
//! envelope so the detector sees believable occupancy overnight.

use anyhow::Result;
use chrono::Timelike;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::db::helpers::{current_timestamp, round1};
use crate::device::source::{DeviceSource, RawReading};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = false;

use crate::log_debug;

pub struct SimulatedDevice {
    rng: StdRng,
    last_command: Option<String>,
}

impl SimulatedDevice {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            last_command: None,
        }
    }

    /// The most recent preference command this device accepted.
    pub fn last_command(&self) -> Option<&str> {
        self.last_command.as_deref()
    }
}

impl Default for SimulatedDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceSource for SimulatedDevice {
    async fn poll(&mut self) -> Result<Option<RawReading>> {
        let hour = current_timestamp().hour();
        let daytime = (6..22).contains(&hour);

        let reading = if daytime {
            RawReading {
                temperature: round1(self.rng.gen_range(20.0..25.0)),
                light: round1(self.rng.gen_range(30.0..90.0)),
                pressure: self.rng.gen_range(0..=1),
            }
        } else {
            RawReading {
                temperature: round1(self.rng.gen_range(16.0..22.0)),
                light: round1(self.rng.gen_range(0.0..15.0)),
                pressure: self.rng.gen_range(1..=5),
            }
        };

        Ok(Some(reading))
    }

    async fn push_preferences(&mut self, command: &str) -> Result<()> {
        log_debug!("simulated device accepted {}", command.trim_end());
        self.last_command = Some(command.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn always_produces_a_reading_in_range() {
        let mut device = SimulatedDevice::new();
        for _ in 0..50 {
            let raw = device.poll().await.unwrap().unwrap();
            assert!((14.0..=26.0).contains(&raw.temperature));
            assert!((0.0..=90.0).contains(&raw.light));
            assert!((0..=5).contains(&raw.pressure));
        }
    }

    #[tokio::test]
    async fn remembers_the_last_preference_command() {
        let mut device = SimulatedDevice::new();
        device.push_preferences("PREFS:18.5,10,1,1\n").await.unwrap();
        assert_eq!(device.last_command(), Some("PREFS:18.5,10,1,1\n"));
    }
}
