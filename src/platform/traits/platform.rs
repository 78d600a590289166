//! Root platform trait
//!
//! This module defines the root trait that aggregates the instrument's links.

use super::{EcuControl, McbLink, ParamStorage, TelemetrySink, TimeSource};
use crate::platform::Result;

/// Root platform trait
///
/// Platform implementations provide concrete types for each link via
/// associated types, so the instrument is monomorphized over the platform
/// and link calls dispatch statically.
///
/// Each `create_*` method hands out its link once; the instrument owns the
/// links for the rest of the run.
///
/// # Example
///
/// ```ignore
/// impl InstrumentPlatform for FlightPlatform {
///     type Mcb = SerialMcb;
///     type Telemetry = ZephyrTelemetry;
///     // ... other associated types
///
///     fn init() -> Result<Self> {
///         Ok(Self { /* ... */ })
///     }
///
///     fn create_mcb_link(&mut self) -> Result<Self::Mcb> {
///         // Claim the MCB serial port
///     }
///
///     // ... other methods
/// }
/// ```
pub trait InstrumentPlatform: Sized {
    /// Motor control board serial link
    type Mcb: McbLink;

    /// Zephyr telemetry downlink
    type Telemetry: TelemetrySink;

    /// Durable parameter storage
    type Storage: ParamStorage;

    /// ECU power and configuration
    type Ecu: EcuControl;

    /// Monotonic time source
    type Time: TimeSource;

    /// Initialize the platform
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InitializationFailed` if initialization fails.
    fn init() -> Result<Self>;

    /// Create the MCB link
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ResourceUnavailable` if the link was already taken.
    fn create_mcb_link(&mut self) -> Result<Self::Mcb>;

    /// Create the telemetry downlink
    fn create_telemetry(&mut self) -> Result<Self::Telemetry>;

    /// Create the parameter storage backend
    fn create_storage(&mut self) -> Result<Self::Storage>;

    /// Create the ECU controller
    fn create_ecu(&mut self) -> Result<Self::Ecu>;

    /// Create the time source
    fn create_time(&mut self) -> Result<Self::Time>;
}
