pub mod preferences;
pub mod reading;
pub mod session;
pub mod stats;
pub mod status;

pub use preferences::Preferences;
pub use reading::{SensorReading, WindowAverages};
pub use session::{SessionSummary, SleepQuality, SleepSession};
pub use stats::{DailySleepStats, SleepStats, WeeklySleepStats};
pub use status::{OptimalConditions, StatusSnapshot};
