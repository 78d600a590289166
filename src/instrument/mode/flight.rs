//! Flight mode sequencer
//!
//! Entry → GpsWait → RadioWait1 → ConfigEcu → RadioWait2 → Measure, with
//! Measure alternating with SendTelemetry. Reel motions run in the manual
//! family (Idle, ManualMotion) and return to Measure or Idle.
//!
//! Each substate has one step function returning the next substate.
//! Transient substates are stepped again in the same tick.

use strato_rats_core::mcb::{
    McbAsciiCommand, MotionDirection, MotionFault, MotionRequest, MotionStatus,
};
use strato_rats_core::mode::{FlightSubstate, ModeState, Resume};
use strato_rats_core::scheduler::Action;
use strato_rats_core::traits::StateFlag;

use crate::instrument::radio::WarmupCheck;
use crate::instrument::{
    Instrument, GPS_WAIT_TICKS, RADIO_SYNC_CHECK_TICKS, TELEMETRY_INTERVAL_TICKS,
};
use crate::platform::{EcuControl, InstrumentPlatform, McbLink, TimeSource};
use crate::{log_debug, log_error, log_info};

impl<P: InstrumentPlatform> Instrument<P> {
    pub(in crate::instrument) fn poll_flight(&mut self, substate: FlightSubstate) {
        if !substate.is_terminal() {
            self.service_status();
            self.service_radio_sync();
        }

        let mut next = self.step_flight(substate);
        self.enter_flight(substate, next);
        while next.is_transient() {
            let after = self.step_flight(next);
            self.enter_flight(next, after);
            next = after;
        }
    }

    fn enter_flight(&mut self, from: FlightSubstate, to: FlightSubstate) {
        if from != to {
            log_info!("Entering FL {}", to.name());
        }
        self.state = ModeState::Flight(to);
    }

    fn step_flight(&mut self, substate: FlightSubstate) -> FlightSubstate {
        match substate {
            FlightSubstate::Entry => self.flight_entry(),
            FlightSubstate::GpsWait => self.flight_gps_wait(),
            FlightSubstate::RadioWait1 | FlightSubstate::RadioWait2 => {
                self.flight_radio_wait(substate)
            }
            FlightSubstate::ConfigEcu => self.flight_config_ecu(),
            FlightSubstate::Measure => self.flight_measure(),
            FlightSubstate::SendTelemetry => self.flight_send_telemetry(),
            FlightSubstate::Idle => self.flight_idle(),
            FlightSubstate::ManualMotion { resume } => self.flight_manual_motion(resume),
            FlightSubstate::Error | FlightSubstate::Shutdown | FlightSubstate::Exit => {
                self.shutdown();
                substate
            }
        }
    }

    fn flight_entry(&mut self) -> FlightSubstate {
        log_info!("Entering FL");
        if let Err(e) = self.ecu.set_power(true) {
            log_error!("ECU power on failed: {}", e.name());
        }
        self.time_valid_latched = self.time_valid;
        self.radio.reset_warmup();

        self.scheduler.arm(Action::SendStatus, 1);
        self.scheduler.arm(Action::RadioSyncCheck, RADIO_SYNC_CHECK_TICKS);
        self.scheduler.arm(Action::GpsWaitMsg, GPS_WAIT_TICKS);
        FlightSubstate::GpsWait
    }

    fn flight_gps_wait(&mut self) -> FlightSubstate {
        if self.scheduler.poll(Action::GpsWaitMsg) {
            log_info!("FL GpsWait waiting for GPS time");
            self.scheduler.arm(Action::GpsWaitMsg, GPS_WAIT_TICKS);
        }

        if self.time_valid {
            self.time_valid_latched = true;
        }
        if !self.time_valid_latched {
            return FlightSubstate::GpsWait;
        }

        self.scheduler.cancel(Action::GpsWaitMsg);
        self.radio.reset_warmup();
        self.scheduler.arm(Action::RadioWaitMsg, 1);
        FlightSubstate::RadioWait1
    }

    fn flight_radio_wait(&mut self, substate: FlightSubstate) -> FlightSubstate {
        if !self.scheduler.poll(Action::RadioWaitMsg) {
            return substate;
        }
        self.scheduler.arm(Action::RadioWaitMsg, 1);
        log_debug!("FL {} waiting for radio messages", substate.name());

        match self.radio.check_warmup() {
            WarmupCheck::Waiting => substate,
            WarmupCheck::Ready => {
                log_info!("FL {} radio messages received", substate.name());
                if substate == FlightSubstate::RadioWait1 {
                    return FlightSubstate::ConfigEcu;
                }
                self.scheduler.cancel(Action::RadioWaitMsg);
                self.scheduler.arm(Action::StartTelemetry, 0);
                FlightSubstate::Measure
            }
            WarmupCheck::TimedOut => {
                log_error!("FL {} radio link silent, giving up", substate.name());
                self.send_uplink_log(StateFlag::Crit, "Radio warmup timed out");
                self.scheduler.cancel(Action::RadioWaitMsg);
                FlightSubstate::Error
            }
        }
    }

    fn flight_config_ecu(&mut self) -> FlightSubstate {
        let method = self.config.proc_method;
        match self.ecu.configure(method) {
            Ok(()) => log_info!("ECU configured, processing method {}", method),
            Err(e) => log_error!("ECU configuration failed: {}", e.name()),
        }
        self.radio.reset_warmup();
        FlightSubstate::RadioWait2
    }

    fn flight_measure(&mut self) -> FlightSubstate {
        self.keep_telemetry_cadence();
        if self.scheduler.poll(Action::StartTelemetry) {
            return FlightSubstate::SendTelemetry;
        }
        let order = [Action::ReelOut, Action::ReelIn];
        if let Some(next) = self.start_pending_motion(Resume::Measure, order) {
            return next;
        }
        log_debug!("FL Measure");
        FlightSubstate::Measure
    }

    fn flight_send_telemetry(&mut self) -> FlightSubstate {
        self.request_voltages();
        FlightSubstate::Measure
    }

    /// Fresh rail voltages for the next report header
    fn request_voltages(&mut self) {
        if let Err(e) = self.mcb.send_ascii(McbAsciiCommand::GetVoltages) {
            log_error!("MCB voltage request failed: {}", e.name());
        }
        self.scheduler.arm(Action::StartTelemetry, TELEMETRY_INTERVAL_TICKS);
    }

    /// Re-arm the telemetry cadence if its flag expired during a motion
    fn keep_telemetry_cadence(&mut self) {
        let flag = Action::StartTelemetry;
        if !self.scheduler.is_armed(flag) && !self.scheduler.is_pending(flag) {
            log_debug!("FL telemetry cadence restarted");
            self.scheduler.arm(flag, 0);
        }
    }

    fn flight_idle(&mut self) -> FlightSubstate {
        // Idle never passes through SendTelemetry
        self.keep_telemetry_cadence();
        if self.scheduler.poll(Action::StartTelemetry) {
            self.request_voltages();
        }
        let order = [Action::ReelIn, Action::ReelOut];
        if let Some(next) = self.start_pending_motion(Resume::Idle, order) {
            return next;
        }
        log_debug!("FL manual idle");
        FlightSubstate::Idle
    }

    fn flight_manual_motion(&mut self, resume: Resume) -> FlightSubstate {
        let now_ms = self.time.now_ms();
        let status = self.tracker.poll(
            now_ms,
            &mut self.mcb,
            &mut self.telemetry,
            &mut self.scheduler,
        );
        self.report_link_error();

        match status {
            MotionStatus::InProgress => FlightSubstate::ManualMotion { resume },
            MotionStatus::Completed => {
                log_info!("Motion complete");
                resume.substate()
            }
            MotionStatus::Failed(fault) => {
                if let MotionFault::McbFault(codes) = fault {
                    log_error!(
                        "MCB fault words {} {} {} {}",
                        codes[0],
                        codes[1],
                        codes[2],
                        codes[3]
                    );
                }
                log_error!("Motion failed: {}", fault.name());
                FlightSubstate::Idle
            }
        }
    }

    /// Start the first pending reel action in `order`, if any
    fn start_pending_motion(
        &mut self,
        resume: Resume,
        order: [Action; 2],
    ) -> Option<FlightSubstate> {
        for action in order {
            if self.scheduler.poll(action) {
                let direction = if action == Action::ReelOut {
                    MotionDirection::Deploy
                } else {
                    MotionDirection::Retract
                };
                return Some(self.start_motion(direction, resume));
            }
        }
        None
    }

    fn start_motion(&mut self, direction: MotionDirection, resume: Resume) -> FlightSubstate {
        let (length, velocity) = match direction {
            MotionDirection::Deploy => (self.deploy_length, self.config.deploy_velocity),
            MotionDirection::Retract => (self.retract_length, self.config.retract_velocity),
        };
        let request = MotionRequest::new(direction, length, velocity, self.time.now_ms());
        let permitted = self.state.permits_motion();
        let tm_mode = self.tm_mode();

        match self.tracker.start(
            request,
            permitted,
            tm_mode,
            &mut self.mcb,
            &mut self.scheduler,
        ) {
            Ok(()) => {
                log_info!(
                    "Manual {} of {} revs at {} revs/min",
                    direction.name(),
                    length,
                    velocity
                );
                FlightSubstate::ManualMotion { resume }
            }
            Err(e) => {
                log_error!("Cannot start {}: {}", direction.name(), e.name());
                self.send_uplink_log(StateFlag::Warn, e.name());
                resume.substate()
            }
        }
    }
}
