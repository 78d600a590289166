//! ECU control interface

use crate::platform::Result;

/// Power and configuration control of the science ECU
pub trait EcuControl {
    /// Switch ECU power
    fn set_power(&mut self, on: bool) -> Result<()>;

    /// Current power state
    fn is_powered(&self) -> bool;

    /// Hand the data processing method to the ECU
    ///
    /// # Errors
    ///
    /// Returns `EcuError::NotPowered` if the ECU is off.
    fn configure(&mut self, proc_method: u8) -> Result<()>;
}
