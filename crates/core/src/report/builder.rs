//! RATS report accumulation and emission
//!
//! ECU records received over the radio link are collected until either the
//! configured record count is reached or the report period has elapsed,
//! whichever comes first. The period is checked even when no record has
//! arrived, so an empty report doubles as a heartbeat.

use core::fmt::{self, Write};

use heapless::{String, Vec};

use super::header::{volts_to_centivolts, RatsReportHeader, RATS_HEADER_SIZE_BYTES};
use crate::traits::{LinkError, StateFlag, TelemetrySink, TM_MAX_PAYLOAD_BYTES};

/// Size of one ECU record in bytes
pub const ECU_RECORD_SIZE_BYTES: usize = 40;

/// Record count that triggers a report
pub const NUM_ECU_REPORTS: usize = 180;

/// Record array capacity (one spare slot over the trigger count)
pub const MAX_ECU_RECORDS: usize = NUM_ECU_REPORTS + 1;

/// Default report period in seconds
pub const RATS_REPORT_PERIOD_SECS: u32 = 360;

/// Worst-case report payload
pub const RATS_REPORT_MAX_BYTES: usize =
    RATS_HEADER_SIZE_BYTES + MAX_ECU_RECORDS * ECU_RECORD_SIZE_BYTES;

const _: () = assert!(
    RATS_REPORT_MAX_BYTES <= TM_MAX_PAYLOAD_BYTES,
    "RATS report exceeds TM payload limit"
);

/// One serialized ECU reading
pub type EcuRecord = [u8; ECU_RECORD_SIZE_BYTES];

/// Report builder errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportError {
    /// Record array is at capacity; the report must be emitted first
    Full,
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Full => write!(f, "RATS report record array full"),
        }
    }
}

/// Emission triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    /// Record count that triggers a report (clamped to `1..=NUM_ECU_REPORTS`)
    pub max_records: u16,
    /// Seconds between reports when the count is not reached
    pub period_s: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_records: NUM_ECU_REPORTS as u16,
            period_s: RATS_REPORT_PERIOD_SECS,
        }
    }
}

/// ECU state sampled into the header at emission time
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EcuStatus {
    pub powered: bool,
    /// 56 V rail in volts
    pub v56_volts: f32,
}

/// Accumulates ECU records into RATS reports
pub struct RatsReportBuilder {
    records: Vec<EcuRecord, MAX_ECU_RECORDS>,
    config: ReportConfig,
    last_report_s: u64,
    reports_sent: u32,
}

impl RatsReportBuilder {
    /// Create a builder whose first period starts at `now_s`
    pub fn new(config: ReportConfig, now_s: u64) -> Self {
        let mut builder = Self {
            records: Vec::new(),
            config: ReportConfig::default(),
            last_report_s: now_s,
            reports_sent: 0,
        };
        builder.set_config(config);
        builder
    }

    /// Replace the triggers, clamping the record count to the array bound
    pub fn set_config(&mut self, config: ReportConfig) {
        self.config = ReportConfig {
            max_records: config.max_records.clamp(1, NUM_ECU_REPORTS as u16),
            period_s: config.period_s.max(1),
        };
    }

    pub fn config(&self) -> ReportConfig {
        self.config
    }

    /// Records waiting for the next report
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Timestamp of the last emission (or construction)
    pub fn last_report_s(&self) -> u64 {
        self.last_report_s
    }

    pub fn reports_sent(&self) -> u32 {
        self.reports_sent
    }

    /// Append one record
    pub fn accumulate(&mut self, record: &EcuRecord) -> Result<(), ReportError> {
        self.records.push(*record).map_err(|_| ReportError::Full)
    }

    /// Check whether either trigger has fired
    pub fn is_due(&self, now_s: u64) -> bool {
        self.records.len() >= self.config.max_records as usize
            || now_s.saturating_sub(self.last_report_s) >= self.config.period_s as u64
    }

    /// Emit a report if one is due.
    ///
    /// Returns the emitted header, or `None` when nothing was due.
    pub fn check(
        &mut self,
        now_s: u64,
        ecu: EcuStatus,
        sink: &mut dyn TelemetrySink,
    ) -> Result<Option<RatsReportHeader>, LinkError> {
        if !self.is_due(now_s) {
            return Ok(None);
        }
        self.emit(now_s, ecu, sink).map(Some)
    }

    /// Pack the header and send header plus records as one TM.
    ///
    /// Accumulation state resets whether or not the send succeeded, so a
    /// failing link cannot make the record array overflow.
    pub fn emit(
        &mut self,
        now_s: u64,
        ecu: EcuStatus,
        sink: &mut dyn TelemetrySink,
    ) -> Result<RatsReportHeader, LinkError> {
        let header = RatsReportHeader::new(
            self.records.len() as u16,
            ECU_RECORD_SIZE_BYTES as u16,
            ecu.powered,
            volts_to_centivolts(ecu.v56_volts),
        );
        let header_bytes = header.to_bytes();

        let mut message = String::<48>::new();
        let _ = write!(message, "RATS report: {} records", header.num_ecu_records);

        let result = sink.send_tm(
            StateFlag::Fine,
            message.as_str(),
            &[&header_bytes, self.records.as_slice().as_flattened()],
        );

        self.records.clear();
        self.last_report_s = now_s;
        self.reports_sent = self.reports_sent.saturating_add(1);

        result.map(|()| header)
    }
}
