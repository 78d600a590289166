//! Mock ECU controller

use std::vec::Vec;

use crate::platform::{EcuControl, EcuError, Result};

/// Mock ECU controller
#[derive(Debug, Default)]
pub struct MockEcu {
    powered: bool,
    power_cycles: u32,
    configured: Vec<u8>,
    reject_config: bool,
}

impl MockEcu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reject_config(&mut self, reject: bool) {
        self.reject_config = reject;
    }

    /// Processing methods accepted so far
    pub fn configured(&self) -> &[u8] {
        &self.configured
    }

    /// Number of off-to-on transitions
    pub fn power_cycles(&self) -> u32 {
        self.power_cycles
    }
}

impl EcuControl for MockEcu {
    fn set_power(&mut self, on: bool) -> Result<()> {
        if on && !self.powered {
            self.power_cycles += 1;
        }
        self.powered = on;
        Ok(())
    }

    fn is_powered(&self) -> bool {
        self.powered
    }

    fn configure(&mut self, proc_method: u8) -> Result<()> {
        if !self.powered {
            return Err(EcuError::NotPowered.into());
        }
        if self.reject_config {
            return Err(EcuError::ConfigRejected.into());
        }
        self.configured.push(proc_method);
        Ok(())
    }
}
