//! Line bridge to a real device: readings arrive newline-delimited on stdin
//! (typically from a serial relay such as socat) and preference commands go
//! back out on stdout.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};
use tokio::time::Duration;

use crate::device::source::{DeviceSource, RawReading};
use crate::device::wire;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

/// How long one poll waits for a line before reporting nothing available.
const READ_WAIT_MS: u64 = 800;

pub struct PipeDevice {
    lines: Lines<BufReader<Stdin>>,
    output: Stdout,
    eof_seen: bool,
}

impl PipeDevice {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            output: tokio::io::stdout(),
            eof_seen: false,
        }
    }
}

impl Default for PipeDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceSource for PipeDevice {
    async fn poll(&mut self) -> Result<Option<RawReading>> {
        if self.eof_seen {
            return Ok(None);
        }

        let next = tokio::time::timeout(
            Duration::from_millis(READ_WAIT_MS),
            self.lines.next_line(),
        );
        let line = match next.await {
            Ok(result) => result.context("failed to read from device stream")?,
            // Nothing arrived within the wait; not an error.
            Err(_) => return Ok(None),
        };

        match line {
            Some(line) if line.trim().is_empty() => Ok(None),
            Some(line) => wire::parse_reading_line(&line).map(Some),
            None => {
                self.eof_seen = true;
                log_info!("device stream ended");
                Ok(None)
            }
        }
    }

    async fn push_preferences(&mut self, command: &str) -> Result<()> {
        self.output
            .write_all(command.as_bytes())
            .await
            .context("failed to write preference command")?;
        self.output
            .flush()
            .await
            .context("failed to flush preference command")?;
        Ok(())
    }
}
