//! Pure occupancy state machine. All store effects live in the controller;
//! this module only decides what a pressure sample means given the current
//! state, which keeps the transition rules trivially testable.

use chrono::NaiveDateTime;

/// Tunables for the pressure-based occupancy decision.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Pressure strictly above this counts as occupied. The mattress sensor
    /// reports 0 for an empty bed and climbs with contact confidence, so a
    /// threshold of 1 ignores incidental contact.
    pub pressure_threshold: i64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            pressure_threshold: 1,
        }
    }
}

/// Where the detector currently is in the session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    NoActiveSession,
    ActiveSession {
        session_id: i64,
        start_time: NaiveDateTime,
    },
}

/// Store action a reading calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    OpenSession,
    CloseSession,
}

impl DetectorState {
    pub fn is_active(&self) -> bool {
        matches!(self, DetectorState::ActiveSession { .. })
    }

    /// Decides the transition for one pressure sample. Occupied with no
    /// active session opens one; empty with an active session closes it;
    /// everything else is a no-op, so repeated samples on either side of the
    /// threshold are idempotent.
    pub fn decide(&self, pressure: i64, config: &DetectorConfig) -> Transition {
        let occupied = pressure > config.pressure_threshold;
        match (self, occupied) {
            (DetectorState::NoActiveSession, true) => Transition::OpenSession,
            (DetectorState::ActiveSession { .. }, false) => Transition::CloseSession,
            _ => Transition::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn active() -> DetectorState {
        DetectorState::ActiveSession {
            session_id: 1,
            start_time: NaiveDate::from_ymd_opt(2025, 3, 14)
                .unwrap()
                .and_hms_opt(22, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn empty_bed_with_no_session_is_a_no_op() {
        let config = DetectorConfig::default();
        assert_eq!(
            DetectorState::NoActiveSession.decide(0, &config),
            Transition::None
        );
        assert_eq!(
            DetectorState::NoActiveSession.decide(1, &config),
            Transition::None
        );
    }

    #[test]
    fn occupancy_opens_only_without_a_session() {
        let config = DetectorConfig::default();
        assert_eq!(
            DetectorState::NoActiveSession.decide(2, &config),
            Transition::OpenSession
        );
        assert_eq!(active().decide(2, &config), Transition::None);
        assert_eq!(active().decide(5, &config), Transition::None);
    }

    #[test]
    fn threshold_is_strictly_greater_than() {
        let config = DetectorConfig::default();
        // Exactly at the threshold reads as empty.
        assert_eq!(active().decide(1, &config), Transition::CloseSession);
        assert_eq!(active().decide(0, &config), Transition::CloseSession);
    }

    #[test]
    fn custom_threshold_shifts_the_boundary() {
        let config = DetectorConfig {
            pressure_threshold: 3,
        };
        assert_eq!(
            DetectorState::NoActiveSession.decide(3, &config),
            Transition::None
        );
        assert_eq!(
            DetectorState::NoActiveSession.decide(4, &config),
            Transition::OpenSession
        );
    }

    #[test]
    fn is_active_tracks_variant() {
        assert!(!DetectorState::NoActiveSession.is_active());
        assert!(active().is_active());
    }
}
