//! Status TM, uplink log lines and the shared shutdown sequence

use ::core::fmt::Write;

use heapless::String;
use strato_rats_core::scheduler::Action;
use strato_rats_core::traits::StateFlag;

use super::{Instrument, STATUS_MSG_PERIOD_TICKS};
use crate::platform::{EcuControl, InstrumentPlatform, TelemetrySink};
use crate::{log_debug, log_error, log_info, log_warn};

/// Capacity of the status TM message
pub const STATUS_MSG_LEN: usize = 128;

impl<P: InstrumentPlatform> Instrument<P> {
    /// Send the status TM when its period elapsed
    pub(super) fn service_status(&mut self) {
        if !self.scheduler.poll(Action::SendStatus) {
            return;
        }
        self.send_status();
        self.scheduler.arm(Action::SendStatus, STATUS_MSG_PERIOD_TICKS);
    }

    /// Send one status TM
    pub fn send_status(&mut self) {
        let mut message: String<STATUS_MSG_LEN> = String::new();
        let motion = if self.tracker.is_ongoing() { "moving" } else { "stopped" };
        let ecu = if self.ecu.is_powered() { "on" } else { "off" };
        let written = write!(
            message,
            "{} {} motion={} radio={} records={} ecu={}",
            self.state.mode().name(),
            self.state.substate_name(),
            motion,
            self.radio.total(),
            self.report.record_count(),
            ecu,
        );
        if written.is_err() {
            log_warn!("Status message truncated");
        }

        match self.telemetry.send_tm(StateFlag::Fine, message.as_str(), &[]) {
            Ok(()) => log_debug!("Status sent"),
            Err(e) => log_error!("Status TM failed: {}", e.name()),
        }
    }

    /// Send a log line uplink, logging transport failures locally
    pub(super) fn send_uplink_log(&mut self, flag: StateFlag, message: &str) {
        if let Err(e) = self.telemetry.send_log(flag, message) {
            log_error!("Uplink log failed: {}", e.name());
        }
    }

    /// Shutdown sequence shared by the Error, Shutdown and Exit substates
    ///
    /// Any motion is stopped on every call. The remaining steps run once per
    /// entry into a terminal substate.
    pub(super) fn shutdown(&mut self) {
        if self
            .tracker
            .abort(&mut self.mcb, &mut self.telemetry, &mut self.scheduler)
        {
            log_warn!("Motion stopped for shutdown");
        }
        self.report_link_error();

        if self.shutdown_done {
            return;
        }
        self.shutdown_done = true;

        if let Err(e) = self.ecu.set_power(false) {
            log_error!("ECU power off failed: {}", e.name());
        }
        for action in Action::ALL {
            if action != Action::RatsReport {
                self.scheduler.cancel(action);
            }
        }
        self.send_status();
        log_info!(
            "{} {} shutdown complete",
            self.state.mode().name(),
            self.state.substate_name()
        );
    }
}
