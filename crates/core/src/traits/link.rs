//! Outbound links to the motor control board and the telemetry downlink.
//!
//! Framing, checksums and serial buffering are the transport's concern. The
//! core only decides *what* is sent and reacts to the success flag.

use core::fmt;

use crate::mcb::{McbAsciiCommand, McbParamCommand};

/// Maximum binary payload accepted by the telemetry transport, in bytes.
///
/// TODO: confirm against the Zephyr TM limit once XML header overhead is
/// accounted for; the report budget in [`crate::report`] is checked against it.
pub const TM_MAX_PAYLOAD_BYTES: usize = 8192;

/// Errors reported by outbound links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// Transport refused or failed to write the message
    WriteFailed,
    /// Payload exceeds [`TM_MAX_PAYLOAD_BYTES`]
    PayloadTooLarge,
    /// Link is not available (powered down, not initialised)
    Unavailable,
}

impl LinkError {
    pub fn name(&self) -> &'static str {
        match self {
            LinkError::WriteFailed => "write failed",
            LinkError::PayloadTooLarge => "payload too large",
            LinkError::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::WriteFailed => write!(f, "link write failed"),
            LinkError::PayloadTooLarge => write!(f, "payload exceeds TM limit"),
            LinkError::Unavailable => write!(f, "link unavailable"),
        }
    }
}

/// Telemetry state flag attached to every TM and uplink log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFlag {
    /// Nominal
    Fine,
    /// Degraded, operator attention suggested
    Warn,
    /// Fault
    Crit,
}

impl StateFlag {
    pub fn name(&self) -> &'static str {
        match self {
            StateFlag::Fine => "FINE",
            StateFlag::Warn => "WARN",
            StateFlag::Crit => "CRIT",
        }
    }
}

/// Serial link to the motor control board.
pub trait McbLink {
    /// Send a parameterless ASCII command.
    fn send_ascii(&mut self, command: McbAsciiCommand) -> Result<(), LinkError>;

    /// Send a command carrying numeric parameters.
    fn send_param(&mut self, command: &McbParamCommand) -> Result<(), LinkError>;
}

/// Telemetry downlink.
pub trait TelemetrySink {
    /// Send one TM made of a message and a binary payload.
    ///
    /// The payload is given as ordered segments that the transport
    /// concatenates; their total length must not exceed
    /// [`TM_MAX_PAYLOAD_BYTES`].
    fn send_tm(
        &mut self,
        flag: StateFlag,
        message: &str,
        payload: &[&[u8]],
    ) -> Result<(), LinkError>;

    /// Send a text-only log line uplink.
    fn send_log(&mut self, flag: StateFlag, message: &str) -> Result<(), LinkError>;
}

/// Total length of a segmented payload
pub fn payload_len(payload: &[&[u8]]) -> usize {
    payload.iter().map(|segment| segment.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_len_sums_segments() {
        let header = [7u8; 7];
        let records = [0u8; 80];
        assert_eq!(payload_len(&[&header, &records]), 87);
        assert_eq!(payload_len(&[]), 0);
    }

    #[test]
    fn state_flag_names() {
        assert_eq!(StateFlag::Fine.name(), "FINE");
        assert_eq!(StateFlag::Crit.name(), "CRIT");
    }
}
