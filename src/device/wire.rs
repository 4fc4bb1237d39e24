//! String wire format spoken by the device firmware.
//!
//! Inbound lines: `temp:<num>,light:<num>,pressure:<num>`. Outbound
//! preference commands: `PREFS:<ideal_temp>,<max_light>,<adaptive01>,<auto01>`.

use anyhow::{anyhow, Context, Result};

use crate::db::models::Preferences;
use crate::device::source::RawReading;

/// Parses one reading line. Unknown keys are ignored so firmware additions do
/// not break older daemons, but all three known fields must be present and
/// numeric.
pub fn parse_reading_line(line: &str) -> Result<RawReading> {
    let mut temperature = None;
    let mut light = None;
    let mut pressure = None;

    for pair in line.trim().split(',') {
        let (key, value) = pair
            .split_once(':')
            .ok_or_else(|| anyhow!("malformed field {pair:?}"))?;
        let value: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("non-numeric value for {:?}", key.trim()))?;
        match key.trim() {
            "temp" => temperature = Some(value),
            "light" => light = Some(value),
            "pressure" => pressure = Some(value),
            _ => {}
        }
    }

    Ok(RawReading {
        temperature: temperature.ok_or_else(|| anyhow!("reading line missing temp"))?,
        light: light.ok_or_else(|| anyhow!("reading line missing light"))?,
        // The firmware reports integer contact counts; tolerate a float
        // encoding of them.
        pressure: pressure
            .ok_or_else(|| anyhow!("reading line missing pressure"))?
            .round() as i64,
    })
}

/// Encodes the device-facing half of the preferences as a command line,
/// newline terminated.
pub fn encode_prefs_command(prefs: &Preferences) -> String {
    format!(
        "PREFS:{},{},{},{}\n",
        prefs.ideal_temp,
        prefs.max_light,
        u8::from(prefs.adaptive_light),
        u8::from(prefs.auto_temp),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_line() {
        let raw = parse_reading_line("temp:21.5,light:12.0,pressure:3").unwrap();
        assert_eq!(raw.temperature, 21.5);
        assert_eq!(raw.light, 12.0);
        assert_eq!(raw.pressure, 3);
    }

    #[test]
    fn tolerates_whitespace_and_field_order() {
        let raw = parse_reading_line("  light: 12 , pressure: 0 , temp: 18 \n").unwrap();
        assert_eq!(raw.temperature, 18.0);
        assert_eq!(raw.light, 12.0);
        assert_eq!(raw.pressure, 0);
    }

    #[test]
    fn rounds_float_encoded_pressure() {
        let raw = parse_reading_line("temp:20,light:10,pressure:2.6").unwrap();
        assert_eq!(raw.pressure, 3);
    }

    #[test]
    fn ignores_unknown_keys() {
        let raw = parse_reading_line("temp:20,light:10,pressure:1,humidity:40").unwrap();
        assert_eq!(raw.temperature, 20.0);
    }

    #[test]
    fn rejects_missing_fields() {
        assert!(parse_reading_line("temp:20,light:10").is_err());
        assert!(parse_reading_line("").is_err());
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert!(parse_reading_line("temp:warm,light:10,pressure:1").is_err());
    }

    #[test]
    fn rejects_fields_without_separator() {
        assert!(parse_reading_line("temp 20,light:10,pressure:1").is_err());
    }

    #[test]
    fn encodes_preference_command() {
        let mut prefs = Preferences::default();
        prefs.auto_temp = false;
        assert_eq!(encode_prefs_command(&prefs), "PREFS:18.5,10,1,0\n");
    }
}
