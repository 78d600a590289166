//! Mock platform implementation for testing
//!
//! In-memory links that record everything the instrument sends, so that
//! scenario tests can assert on MCB commands, telemetry and ECU state
//! without hardware.

mod ecu;
mod mcb;
mod platform;
mod storage;
mod telemetry;

pub use ecu::MockEcu;
pub use mcb::{McbCommand, MockMcb};
pub use platform::MockPlatform;
pub use storage::MockStorage;
pub use telemetry::{MockTelemetry, SentLog, SentTm};
pub use strato_rats_core::traits::MockTime;
