//! Demo seeding: bulk history written through the real scorer.

mod common;

use common::temp_db_path;
use drowse::db::models::SleepQuality;
use drowse::{Database, SleepTracker};

#[tokio::test]
async fn seeding_populates_sessions_and_readings() {
    let db = Database::new(temp_db_path("seed")).unwrap();

    let report = db.seed_demo_history(14).await.unwrap();
    assert_eq!(report.sessions, 14);
    assert_eq!(report.readings, 36);
    assert_eq!(db.count_readings().await.unwrap(), 36);

    // Every seeded session arrives finalized.
    assert_eq!(db.count_open_sessions().await.unwrap(), 0);

    let tracker = SleepTracker::new(db.clone());
    let history = tracker.sleep_history(30).await.unwrap();
    assert_eq!(history.len(), 14);
    for summary in &history {
        assert!(summary.hours >= 4.0 && summary.hours <= 9.0);
        assert!(summary.quality != SleepQuality::Unknown);
        assert!(summary.temp.is_some());
        assert!(summary.light.is_some());
    }

    let stats = tracker.sleep_stats(30).await.unwrap();
    assert_eq!(stats.weekly.session_count, 14);
    assert_eq!(stats.daily.len(), 14);
    assert!(stats.weekly.avg_hours >= 4.0 && stats.weekly.avg_hours <= 9.0);
}

#[tokio::test]
async fn seeding_appends_instead_of_replacing() {
    let db = Database::new(temp_db_path("seed-append")).unwrap();

    db.seed_demo_history(3).await.unwrap();
    db.seed_demo_history(3).await.unwrap();

    assert_eq!(db.count_readings().await.unwrap(), 72);
    let tracker = SleepTracker::new(db.clone());
    assert_eq!(tracker.sleep_history(30).await.unwrap().len(), 6);
}
