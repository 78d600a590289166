//! Platform-agnostic interfaces consumed by the instrument core.
//!
//! - Trait definitions carry no feature gates
//! - `MockTime` is always available for host testing
//! - Real transports (serial MCB link, Zephyr telemetry) live with the platform

pub mod link;
pub mod time;

pub use link::{payload_len, LinkError, McbLink, StateFlag, TelemetrySink, TM_MAX_PAYLOAD_BYTES};
pub use time::{MockTime, TimeSource};
