/// Bracket bounds for the quality scorer, all inclusive.
///
/// Each factor earns 3 points inside its ideal band, 2 inside the wider fair
/// band and 1 otherwise.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Ideal overnight temperature band (°C)
    pub temp_ideal_min: f64,
    pub temp_ideal_max: f64,

    /// Fair temperature band (°C)
    pub temp_fair_min: f64,
    pub temp_fair_max: f64,

    /// Light level ceilings (relative 0-100 units)
    pub light_ideal_max: f64,
    pub light_fair_max: f64,

    /// Ideal sleep duration band (hours)
    pub duration_ideal_min_hours: f64,
    pub duration_ideal_max_hours: f64,

    /// Fair sleep duration band (hours)
    pub duration_fair_min_hours: f64,
    pub duration_fair_max_hours: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            temp_ideal_min: 18.0,
            temp_ideal_max: 22.0,
            temp_fair_min: 16.0,
            temp_fair_max: 24.0,
            light_ideal_max: 15.0,
            light_fair_max: 30.0,
            duration_ideal_min_hours: 7.0,
            duration_ideal_max_hours: 9.0,
            duration_fair_min_hours: 6.0,
            duration_fair_max_hours: 10.0,
        }
    }
}
