//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.
//! The MCB, telemetry and time traits come from the core crate so that the
//! motion tracker and report builder can drive them directly.

pub mod ecu;
pub mod platform;
pub mod storage;

pub use ecu::EcuControl;
pub use platform::InstrumentPlatform;
pub use storage::ParamStorage;
pub use strato_rats_core::traits::{McbLink, TelemetrySink, TimeSource};
