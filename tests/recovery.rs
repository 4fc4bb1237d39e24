//! Crash recovery: an open session survives a restart and closes normally.

mod common;

use common::{temp_db_path, ts};
use drowse::db::models::SleepQuality;
use drowse::tracker::DetectorState;
use drowse::{Database, SleepTracker};

#[tokio::test]
async fn open_session_resumes_across_restart() {
    let path = temp_db_path("recovery");

    let first_session_id = {
        let db = Database::new(path.clone()).unwrap();
        let tracker = SleepTracker::new(db.clone());
        let outcome = tracker
            .record_reading_at(18.0, 3.0, 4, ts(2025, 3, 14, 23, 0, 0))
            .await
            .unwrap();
        outcome.opened_session_id.unwrap()
    };

    // Fresh process against the same store.
    let db = Database::new(path).unwrap();
    let tracker = SleepTracker::new(db.clone());
    match tracker.recover().await.unwrap() {
        DetectorState::ActiveSession {
            session_id,
            start_time,
        } => {
            assert_eq!(session_id, first_session_id);
            assert_eq!(start_time, ts(2025, 3, 14, 23, 0, 0));
        }
        DetectorState::NoActiveSession => panic!("expected the open session to be recovered"),
    }

    // The bed staying occupied across the restart extends the same session.
    let outcome = tracker
        .record_reading_at(18.0, 3.0, 4, ts(2025, 3, 15, 2, 0, 0))
        .await
        .unwrap();
    assert!(outcome.sleeping);
    assert!(outcome.opened_session_id.is_none());
    assert_eq!(db.count_open_sessions().await.unwrap(), 1);

    // The next vacant reading closes the pre-restart session.
    let closed = tracker
        .record_reading_at(18.0, 3.0, 0, ts(2025, 3, 15, 6, 30, 0))
        .await
        .unwrap()
        .closed_session
        .unwrap();
    assert_eq!(closed.id, first_session_id);
    assert_eq!(closed.duration_minutes, Some(450));
    assert_eq!(closed.quality, Some(SleepQuality::Excellent));
    assert_eq!(db.count_open_sessions().await.unwrap(), 0);
}

#[tokio::test]
async fn recover_with_no_open_session_stays_idle() {
    let db = Database::new(temp_db_path("recovery-idle")).unwrap();
    let tracker = SleepTracker::new(db.clone());

    assert_eq!(
        tracker.recover().await.unwrap(),
        DetectorState::NoActiveSession
    );
}
