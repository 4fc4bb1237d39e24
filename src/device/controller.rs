use anyhow::{bail, Context, Result};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::db::Database;
use crate::device::source::DeviceSource;
use crate::settings::IngestSettings;
use crate::tracker::SleepTracker;

use super::loop_worker::ingest_loop;

/// Owns the background ingest task for one device.
pub struct IngestController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl IngestController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    pub fn start<S>(
        &mut self,
        source: S,
        tracker: SleepTracker,
        db: Database,
        settings: IngestSettings,
    ) -> Result<()>
    where
        S: DeviceSource + 'static,
    {
        if self.handle.is_some() {
            bail!("ingest already active");
        }

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let handle = tokio::spawn(ingest_loop(source, tracker, db, settings, token_clone));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("ingest loop task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}

impl Default for IngestController {
    fn default() -> Self {
        Self::new()
    }
}
