//! Radio (LoRa) reception and RATS report emission
//!
//! Every ECU reading relayed over the radio link counts toward the Flight
//! warmup waits and is accumulated into the current RATS report.

use strato_rats_core::report::{EcuRecord, ReportError};
use strato_rats_core::scheduler::Action;

use super::{Instrument, RADIO_MSG_COUNT, RADIO_SYNC_CHECK_TICKS, RADIO_WARMUP_TIMEOUT_TICKS};
use crate::platform::{InstrumentPlatform, TimeSource};
use crate::{log_error, log_info, log_warn};

/// Outcome of one warmup check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum WarmupCheck {
    /// Enough messages arrived
    Ready,
    Waiting,
    /// No message for [`RADIO_WARMUP_TIMEOUT_TICKS`] consecutive checks
    TimedOut,
}

/// Radio message counters
#[derive(Debug, Clone, Default)]
pub struct RadioCounters {
    /// Messages since the current warmup wait started
    warmup: u32,
    /// Messages since start
    total: u32,
    warmup_at_last_check: u32,
    silent_checks: u32,
    total_at_last_sync: u32,
}

impl RadioCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages counted toward the current warmup wait
    pub fn warmup(&self) -> u32 {
        self.warmup
    }

    /// Messages received since start
    pub fn total(&self) -> u32 {
        self.total
    }

    pub(super) fn record_message(&mut self) {
        self.warmup = self.warmup.saturating_add(1);
        self.total = self.total.saturating_add(1);
    }

    pub(super) fn reset_warmup(&mut self) {
        self.warmup = 0;
        self.warmup_at_last_check = 0;
        self.silent_checks = 0;
    }

    pub(super) fn check_warmup(&mut self) -> WarmupCheck {
        if self.warmup >= RADIO_MSG_COUNT {
            return WarmupCheck::Ready;
        }
        if self.warmup == self.warmup_at_last_check {
            self.silent_checks += 1;
        } else {
            self.silent_checks = 0;
        }
        self.warmup_at_last_check = self.warmup;

        if self.silent_checks >= RADIO_WARMUP_TIMEOUT_TICKS {
            WarmupCheck::TimedOut
        } else {
            WarmupCheck::Waiting
        }
    }

    /// True when nothing arrived since the previous sync check
    pub(super) fn sync_silent(&mut self) -> bool {
        let silent = self.total == self.total_at_last_sync;
        self.total_at_last_sync = self.total;
        silent
    }
}

impl<P: InstrumentPlatform> Instrument<P> {
    /// Radio message carrying one ECU record
    pub fn handle_radio_message(&mut self, record: &EcuRecord) {
        self.radio.record_message();

        match self.report.accumulate(record) {
            Ok(()) => {}
            Err(ReportError::Full) => {
                log_error!("RATS report full, forcing emission");
                let now_s = self.time.now_s();
                let ecu = self.ecu_status();
                if let Err(e) = self.report.emit(now_s, ecu, &mut self.telemetry) {
                    log_error!("RATS report send failed: {}", e.name());
                }
                if self.report.accumulate(record).is_err() {
                    log_error!("ECU record dropped");
                }
            }
        }
    }

    /// Radio link watchdog, serviced from Flight
    pub(super) fn service_radio_sync(&mut self) {
        if !self.scheduler.poll(Action::RadioSyncCheck) {
            return;
        }
        self.scheduler
            .arm(Action::RadioSyncCheck, RADIO_SYNC_CHECK_TICKS);
        if self.radio.sync_silent() {
            log_warn!("No radio messages in the last {} ticks", RADIO_SYNC_CHECK_TICKS);
        }
    }

    /// Emit the RATS report when its count or period trigger fired
    pub(super) fn check_report(&mut self) {
        if !self.scheduler.poll(Action::RatsReport) {
            return;
        }
        self.scheduler.arm(Action::RatsReport, 1);

        let now_s = self.time.now_s();
        let ecu = self.ecu_status();
        match self.report.check(now_s, ecu, &mut self.telemetry) {
            Ok(Some(header)) => log_info!("RATS report sent: {} records", header.num_ecu_records),
            Ok(None) => {}
            Err(e) => log_error!("RATS report send failed: {}", e.name()),
        }
    }
}
