use anyhow::Result;

/// One decoded sample from the device, before it becomes a stored reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawReading {
    pub temperature: f64,
    pub light: f64,
    pub pressure: i64,
}

/// Transport seam for the bedroom device.
///
/// The ingest loop is generic over this trait, so the daemon runs the same
/// code against the line bridge ([`PipeDevice`](crate::device::PipeDevice))
/// and the synthetic device ([`SimulatedDevice`](crate::device::SimulatedDevice)).
pub trait DeviceSource: Send {
    /// Returns the next sample if one is available this tick. `Ok(None)`
    /// means nothing arrived; `Err` means a sample was offered but unusable.
    fn poll(&mut self) -> impl std::future::Future<Output = Result<Option<RawReading>>> + Send;

    /// Delivers an encoded preference command to the device.
    fn push_preferences(
        &mut self,
        command: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
