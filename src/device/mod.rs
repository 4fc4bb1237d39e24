//! Device transports and the background ingest loop.

pub mod controller;
pub mod loop_worker;
pub mod pipe;
pub mod simulator;
pub mod source;
pub mod wire;

pub use controller::IngestController;
pub use pipe::PipeDevice;
pub use simulator::SimulatedDevice;
pub use source::{DeviceSource, RawReading};
