//! Mock Platform implementation for testing

use crate::platform::{error::PlatformError, traits::InstrumentPlatform, Result};

use super::{MockEcu, MockMcb, MockStorage, MockTelemetry, MockTime};

/// Mock Platform implementation
///
/// Hands out each mock link once, like a real platform handing out
/// peripherals.
///
/// # Example
///
/// ```ignore
/// let mut platform = MockPlatform::new();
/// let mut instrument = Instrument::new(&mut platform).unwrap();
/// instrument.setup();
/// instrument.tick();
/// ```
#[derive(Debug, Default)]
pub struct MockPlatform {
    storage: Option<MockStorage>,
    mcb_taken: bool,
    telemetry_taken: bool,
    storage_taken: bool,
    ecu_taken: bool,
    time_taken: bool,
}

impl MockPlatform {
    /// Create a new mock platform with empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock platform whose storage holds parameters from a previous run
    pub fn with_storage(storage: MockStorage) -> Self {
        Self {
            storage: Some(storage),
            ..Self::default()
        }
    }
}

fn claim(taken: &mut bool) -> Result<()> {
    if *taken {
        return Err(PlatformError::ResourceUnavailable);
    }
    *taken = true;
    Ok(())
}

impl InstrumentPlatform for MockPlatform {
    type Mcb = MockMcb;
    type Telemetry = MockTelemetry;
    type Storage = MockStorage;
    type Ecu = MockEcu;
    type Time = MockTime;

    fn init() -> Result<Self> {
        Ok(Self::new())
    }

    fn create_mcb_link(&mut self) -> Result<Self::Mcb> {
        claim(&mut self.mcb_taken)?;
        Ok(MockMcb::new())
    }

    fn create_telemetry(&mut self) -> Result<Self::Telemetry> {
        claim(&mut self.telemetry_taken)?;
        Ok(MockTelemetry::new())
    }

    fn create_storage(&mut self) -> Result<Self::Storage> {
        claim(&mut self.storage_taken)?;
        Ok(self.storage.take().unwrap_or_default())
    }

    fn create_ecu(&mut self) -> Result<Self::Ecu> {
        claim(&mut self.ecu_taken)?;
        Ok(MockEcu::new())
    }

    fn create_time(&mut self) -> Result<Self::Time> {
        claim(&mut self.time_taken)?;
        Ok(MockTime::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_handed_out_once() {
        let mut platform = MockPlatform::init().unwrap();
        assert!(platform.create_mcb_link().is_ok());
        assert_eq!(
            platform.create_mcb_link().unwrap_err(),
            PlatformError::ResourceUnavailable
        );
        assert!(platform.create_time().is_ok());
    }
}
