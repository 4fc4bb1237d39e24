#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{NaiveDate, NaiveDateTime};

static NEXT_DB: AtomicU64 = AtomicU64::new(0);

/// Fresh database path per test so parallel tests never share a store.
pub fn temp_db_path(name: &str) -> PathBuf {
    let n = NEXT_DB.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "drowse-test-{}-{}-{}.sqlite3",
        name,
        std::process::id(),
        n
    ))
}

pub fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}
