use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use tokio::time::{interval, Duration, MissedTickBehavior};

use drowse::device::{IngestController, PipeDevice, SimulatedDevice};
use drowse::tracker::DetectorState;
use drowse::{Database, Settings, SleepTracker};

const HEARTBEAT_SECS: u64 = 60;

/// Smart bedroom sleep tracking daemon
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the settings file
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,

    /// Seed demo history for this many days, then exit
    #[arg(long, num_args = 0..=1, default_missing_value = "14")]
    seed: Option<i64>,

    /// Ingest from the simulated device instead of the stdin bridge
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let settings = Settings::load(&args.settings)?;

    info!("drowse starting up...");

    let db = Database::new(settings.database_path())?;

    if let Some(days) = args.seed {
        let report = db.seed_demo_history(days).await?;
        info!(
            "seeded {} sessions and {} readings into {}",
            report.sessions,
            report.readings,
            db.path().display()
        );
        return Ok(());
    }

    let tracker = SleepTracker::new(db.clone());
    if let DetectorState::ActiveSession { session_id, .. } = tracker.recover().await? {
        warn!("resuming open sleep session {session_id} from a previous run");
    }

    let mut controller = IngestController::new();
    if args.demo || settings.ingest.demo_mode {
        info!("ingesting from the simulated device");
        controller.start(
            SimulatedDevice::new(),
            tracker.clone(),
            db.clone(),
            settings.ingest.clone(),
        )?;
    } else {
        info!("ingesting from the stdin device bridge");
        controller.start(
            PipeDevice::new(),
            tracker.clone(),
            db.clone(),
            settings.ingest.clone(),
        )?;
    }

    let mut heartbeat = interval(Duration::from_secs(HEARTBEAT_SECS));
    heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first interval tick completes immediately; skip it so the first
    // heartbeat carries a minute of data.
    heartbeat.tick().await;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown requested");
                break;
            }
            _ = heartbeat.tick() => {
                let snapshot = tracker.metrics().get_snapshot().await;
                info!(
                    "heartbeat: {} readings ingested ({} opened, {} closed, {} errors), cpu {:.1}%, rss {:.1} MB",
                    snapshot.ingest_count,
                    snapshot.session_open_count,
                    snapshot.session_close_count,
                    snapshot.error_count,
                    snapshot.system.cpu_percent,
                    snapshot.system.memory_mb,
                );
            }
        }
    }

    controller.stop().await?;
    info!("drowse stopped");
    Ok(())
}
