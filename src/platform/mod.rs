//! Platform abstraction layer
//!
//! The instrument reaches the outside world only through the traits defined
//! here. Flight builds provide serial and Zephyr-backed implementations;
//! host tests use the mock platform.

pub mod error;
pub mod traits;

#[cfg(test)]
pub mod mock;

pub use error::{EcuError, PlatformError, Result, StorageError};
pub use traits::{EcuControl, InstrumentPlatform, McbLink, ParamStorage, TelemetrySink, TimeSource};
