use crate::db::models::{SleepQuality, WindowAverages};
use crate::scoring::config::ScoringConfig;

/// Score a closed session from its window averages and duration.
///
/// Three factors each contribute 1-3 points; the 3-9 total maps onto the
/// quality labels. Duration is taken in exact (fractional) minutes so a
/// session just under a band edge is not rounded into it.
pub fn score_session(
    averages: &WindowAverages,
    duration_minutes: f64,
    config: &ScoringConfig,
) -> SleepQuality {
    let score = temperature_points(averages.temperature, config)
        + light_points(averages.light, config)
        + duration_points(duration_minutes / 60.0, config);
    label_for_score(score)
}

/// Same as [`score_session`] for windows that may hold no readings, which
/// score `Unknown` instead of failing.
pub fn score_window(
    averages: Option<&WindowAverages>,
    duration_minutes: f64,
    config: &ScoringConfig,
) -> SleepQuality {
    match averages {
        Some(averages) => score_session(averages, duration_minutes, config),
        None => SleepQuality::Unknown,
    }
}

/// Temperature factor: 3 inside the ideal band, 2 inside the fair band.
fn temperature_points(avg_temp: f64, config: &ScoringConfig) -> u8 {
    if avg_temp >= config.temp_ideal_min && avg_temp <= config.temp_ideal_max {
        3
    } else if (avg_temp >= config.temp_fair_min && avg_temp < config.temp_ideal_min)
        || (avg_temp > config.temp_ideal_max && avg_temp <= config.temp_fair_max)
    {
        2
    } else {
        1
    }
}

/// Light factor: darkness is graded against the two ceilings. Negative
/// readings are sensor garbage and score 1.
fn light_points(avg_light: f64, config: &ScoringConfig) -> u8 {
    if avg_light >= 0.0 && avg_light <= config.light_ideal_max {
        3
    } else if avg_light > config.light_ideal_max && avg_light <= config.light_fair_max {
        2
    } else {
        1
    }
}

/// Duration factor over hours slept.
fn duration_points(hours: f64, config: &ScoringConfig) -> u8 {
    if hours >= config.duration_ideal_min_hours && hours <= config.duration_ideal_max_hours {
        3
    } else if (hours >= config.duration_fair_min_hours && hours < config.duration_ideal_min_hours)
        || (hours > config.duration_ideal_max_hours && hours <= config.duration_fair_max_hours)
    {
        2
    } else {
        1
    }
}

/// 8-9 Excellent, 6-7 Good, 4-5 Fair, 3 Poor.
fn label_for_score(score: u8) -> SleepQuality {
    if score >= 8 {
        SleepQuality::Excellent
    } else if score >= 6 {
        SleepQuality::Good
    } else if score >= 4 {
        SleepQuality::Fair
    } else {
        SleepQuality::Poor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScoringConfig {
        ScoringConfig::default()
    }

    #[test]
    fn temperature_band_edges_are_inclusive() {
        let c = config();
        assert_eq!(temperature_points(18.0, &c), 3);
        assert_eq!(temperature_points(22.0, &c), 3);
        assert_eq!(temperature_points(17.99, &c), 2);
        assert_eq!(temperature_points(16.0, &c), 2);
        assert_eq!(temperature_points(22.01, &c), 2);
        assert_eq!(temperature_points(24.0, &c), 2);
        assert_eq!(temperature_points(15.99, &c), 1);
        assert_eq!(temperature_points(24.01, &c), 1);
    }

    #[test]
    fn light_band_edges_are_inclusive() {
        let c = config();
        assert_eq!(light_points(0.0, &c), 3);
        assert_eq!(light_points(15.0, &c), 3);
        assert_eq!(light_points(15.01, &c), 2);
        assert_eq!(light_points(30.0, &c), 2);
        assert_eq!(light_points(30.01, &c), 1);
        assert_eq!(light_points(-0.5, &c), 1);
    }

    #[test]
    fn duration_band_edges_are_inclusive() {
        let c = config();
        assert_eq!(duration_points(7.0, &c), 3);
        assert_eq!(duration_points(9.0, &c), 3);
        assert_eq!(duration_points(6.0, &c), 2);
        assert_eq!(duration_points(6.99, &c), 2);
        assert_eq!(duration_points(9.01, &c), 2);
        assert_eq!(duration_points(10.0, &c), 2);
        assert_eq!(duration_points(5.99, &c), 1);
        assert_eq!(duration_points(10.01, &c), 1);
    }

    #[test]
    fn label_thresholds() {
        assert_eq!(label_for_score(9), SleepQuality::Excellent);
        assert_eq!(label_for_score(8), SleepQuality::Excellent);
        assert_eq!(label_for_score(7), SleepQuality::Good);
        assert_eq!(label_for_score(6), SleepQuality::Good);
        assert_eq!(label_for_score(5), SleepQuality::Fair);
        assert_eq!(label_for_score(4), SleepQuality::Fair);
        assert_eq!(label_for_score(3), SleepQuality::Poor);
    }

    #[test]
    fn ideal_night_scores_excellent() {
        let averages = WindowAverages {
            temperature: 19.5,
            light: 5.0,
        };
        assert_eq!(
            score_session(&averages, 8.0 * 60.0, &config()),
            SleepQuality::Excellent
        );
    }

    #[test]
    fn poor_across_the_board_scores_poor() {
        let averages = WindowAverages {
            temperature: 28.0,
            light: 55.0,
        };
        assert_eq!(
            score_session(&averages, 3.0 * 60.0, &config()),
            SleepQuality::Poor
        );
    }

    #[test]
    fn mixed_factors_land_in_the_middle() {
        // 3 (temp) + 2 (light) + 1 (duration) = 6 -> Good
        let averages = WindowAverages {
            temperature: 20.0,
            light: 20.0,
        };
        assert_eq!(
            score_session(&averages, 2.0 * 60.0, &config()),
            SleepQuality::Good
        );

        // 1 + 2 + 2 = 5 -> Fair
        let averages = WindowAverages {
            temperature: 26.0,
            light: 20.0,
        };
        assert_eq!(
            score_session(&averages, 6.5 * 60.0, &config()),
            SleepQuality::Fair
        );
    }

    #[test]
    fn empty_window_scores_unknown() {
        assert_eq!(
            score_window(None, 8.0 * 60.0, &config()),
            SleepQuality::Unknown
        );
        let averages = WindowAverages {
            temperature: 19.5,
            light: 5.0,
        };
        assert_eq!(
            score_window(Some(&averages), 8.0 * 60.0, &config()),
            SleepQuality::Excellent
        );
    }

    #[test]
    fn exact_minutes_are_not_rounded_into_a_band() {
        // 419.6 min is 6.993 hours, short of the ideal band even though the
        // stored minute count rounds to 420. 3 + 2 + 2 = 7 -> Good.
        let averages = WindowAverages {
            temperature: 20.0,
            light: 20.0,
        };
        assert_eq!(
            score_session(&averages, 419.6, &config()),
            SleepQuality::Good
        );
    }
}
