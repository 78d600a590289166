//! Mock telemetry downlink

use std::string::{String, ToString};
use std::vec::Vec;

use strato_rats_core::traits::{payload_len, LinkError, StateFlag, TelemetrySink, TM_MAX_PAYLOAD_BYTES};

/// TM recorded by [`MockTelemetry`]
#[derive(Debug, Clone, PartialEq)]
pub struct SentTm {
    pub flag: StateFlag,
    pub message: String,
    /// Concatenated payload segments
    pub payload: Vec<u8>,
}

/// Uplink log line recorded by [`MockTelemetry`]
#[derive(Debug, Clone, PartialEq)]
pub struct SentLog {
    pub flag: StateFlag,
    pub message: String,
}

/// Mock telemetry downlink
///
/// Enforces the TM payload limit like the real transport.
#[derive(Debug, Default)]
pub struct MockTelemetry {
    tms: Vec<SentTm>,
    logs: Vec<SentLog>,
    fail: bool,
}

impl MockTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following send fail (or succeed again)
    pub fn set_fail(&mut self, fail: bool) {
        self.fail = fail;
    }

    pub fn tms(&self) -> &[SentTm] {
        &self.tms
    }

    pub fn logs(&self) -> &[SentLog] {
        &self.logs
    }

    /// TMs whose message starts with `prefix`
    pub fn tms_starting_with(&self, prefix: &str) -> Vec<&SentTm> {
        self.tms
            .iter()
            .filter(|tm| tm.message.starts_with(prefix))
            .collect()
    }

    pub fn last_log(&self) -> Option<&SentLog> {
        self.logs.last()
    }

    pub fn clear(&mut self) {
        self.tms.clear();
        self.logs.clear();
    }
}

impl TelemetrySink for MockTelemetry {
    fn send_tm(
        &mut self,
        flag: StateFlag,
        message: &str,
        payload: &[&[u8]],
    ) -> Result<(), LinkError> {
        if self.fail {
            return Err(LinkError::WriteFailed);
        }
        if payload_len(payload) > TM_MAX_PAYLOAD_BYTES {
            return Err(LinkError::PayloadTooLarge);
        }
        self.tms.push(SentTm {
            flag,
            message: message.to_string(),
            payload: payload.concat(),
        });
        Ok(())
    }

    fn send_log(&mut self, flag: StateFlag, message: &str) -> Result<(), LinkError> {
        if self.fail {
            return Err(LinkError::WriteFailed);
        }
        self.logs.push(SentLog {
            flag,
            message: message.to_string(),
        });
        Ok(())
    }
}
