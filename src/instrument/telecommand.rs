//! Telecommand handling
//!
//! Every telecommand is acknowledged. Its outcome is summarised in one line
//! that goes to the local log and to the uplink log channel.

use ::core::fmt::{self, Write};

use heapless::String;
use strato_rats_core::mcb::{McbAsciiCommand, McbParamCommand};
use strato_rats_core::parameters::{rats, ParamValue, ParameterError};
use strato_rats_core::scheduler::Action;
use strato_rats_core::traits::StateFlag;

use super::Instrument;
use crate::platform::{InstrumentPlatform, McbLink, TelemetrySink};
use crate::{log_error, log_info};

/// Capacity of a telecommand summary line
pub const TC_SUMMARY_LEN: usize = 64;

type Summary = String<TC_SUMMARY_LEN>;

/// Telecommands accepted by the instrument
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Telecommand {
    /// Reel out by the given number of revolutions
    DeployLength(f32),
    DeployVelocity(f32),
    DeployAcceleration(f32),
    /// Reel in by the given number of revolutions
    RetractLength(f32),
    RetractVelocity(f32),
    RetractAcceleration(f32),
    FullRetract,
    CancelMotion,
    ZeroReel,
    TorqueLimits { low: f32, high: f32 },
    CurrentLimits { low: f32, high: f32 },
    IgnoreLimits,
    UseLimits,
    GetMcbEeprom,
    GetMcbVoltages,
    SetProcessingMode(u8),
    RealTimeMcbOn,
    RealTimeMcbOff,
    /// Dump the RATS parameters as TM
    GetRatsEeprom,
    /// Id not known to this instrument
    Unknown(u16),
}

impl Telecommand {
    pub fn name(&self) -> &'static str {
        match self {
            Telecommand::DeployLength(_) => "DEPLOY_LENGTH",
            Telecommand::DeployVelocity(_) => "DEPLOY_VELOCITY",
            Telecommand::DeployAcceleration(_) => "DEPLOY_ACCELERATION",
            Telecommand::RetractLength(_) => "RETRACT_LENGTH",
            Telecommand::RetractVelocity(_) => "RETRACT_VELOCITY",
            Telecommand::RetractAcceleration(_) => "RETRACT_ACCELERATION",
            Telecommand::FullRetract => "FULL_RETRACT",
            Telecommand::CancelMotion => "CANCEL_MOTION",
            Telecommand::ZeroReel => "ZERO_REEL",
            Telecommand::TorqueLimits { .. } => "TORQUE_LIMITS",
            Telecommand::CurrentLimits { .. } => "CURRENT_LIMITS",
            Telecommand::IgnoreLimits => "IGNORE_LIMITS",
            Telecommand::UseLimits => "USE_LIMITS",
            Telecommand::GetMcbEeprom => "GET_MCB_EEPROM",
            Telecommand::GetMcbVoltages => "GET_MCB_VOLTAGES",
            Telecommand::SetProcessingMode(_) => "SET_PROCESSING_MODE",
            Telecommand::RealTimeMcbOn => "REAL_TIME_MCB_ON",
            Telecommand::RealTimeMcbOff => "REAL_TIME_MCB_OFF",
            Telecommand::GetRatsEeprom => "GET_RATS_EEPROM",
            Telecommand::Unknown(_) => "UNKNOWN",
        }
    }
}

/// Severity of a telecommand summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Uplinked as FINE
    Nominal,
    /// Uplinked as WARN
    Error,
}

/// Acknowledgement returned for every telecommand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcAck {
    pub severity: Severity,
}

fn summary(args: fmt::Arguments<'_>) -> Summary {
    let mut line = Summary::new();
    // Overlong lines are cut at capacity
    let _ = line.write_fmt(args);
    line
}

impl<P: InstrumentPlatform> Instrument<P> {
    /// Handle one telecommand
    pub fn handle_telecommand(&mut self, tc: Telecommand) -> TcAck {
        let (severity, line) = self.execute_tc(tc);

        match severity {
            Severity::Nominal => {
                log_info!("TC {}: {}", tc.name(), line.as_str());
                self.send_uplink_log(StateFlag::Fine, line.as_str());
            }
            Severity::Error => {
                log_error!("TC {}: {}", tc.name(), line.as_str());
                self.send_uplink_log(StateFlag::Warn, line.as_str());
            }
        }
        TcAck { severity }
    }

    fn execute_tc(&mut self, tc: Telecommand) -> (Severity, Summary) {
        match tc {
            Telecommand::DeployLength(revs) => self.request_length(Action::ReelOut, revs),
            Telecommand::RetractLength(revs) => self.request_length(Action::ReelIn, revs),
            Telecommand::DeployVelocity(v) => {
                self.set_param(rats::DEPLOY_VELOCITY, ParamValue::Float(v), "Deploy velocity")
            }
            Telecommand::RetractVelocity(v) => {
                self.set_param(rats::RETRACT_VELOCITY, ParamValue::Float(v), "Retract velocity")
            }
            Telecommand::DeployAcceleration(a) => self.set_acceleration(
                McbParamCommand::OutAcceleration(a),
                rats::DEPLOY_ACCELERATION,
                a,
            ),
            Telecommand::RetractAcceleration(a) => self.set_acceleration(
                McbParamCommand::InAcceleration(a),
                rats::RETRACT_ACCELERATION,
                a,
            ),
            Telecommand::FullRetract => (
                Severity::Error,
                summary(format_args!("Full retract not implemented")),
            ),
            Telecommand::CancelMotion => {
                self.scheduler.arm(Action::MotionStop, 0);
                match self.mcb.send_ascii(McbAsciiCommand::CancelMotion) {
                    Ok(()) => (Severity::Nominal, summary(format_args!("Motion cancel sent"))),
                    Err(e) => (
                        Severity::Error,
                        summary(format_args!("Motion cancel failed: {}", e.name())),
                    ),
                }
            }
            Telecommand::ZeroReel => {
                if let Some(rejected) = self.reject_while_moving("Zero reel") {
                    return rejected;
                }
                self.send_mcb_ascii(McbAsciiCommand::ZeroReel)
            }
            Telecommand::TorqueLimits { low, high } => {
                self.send_mcb_param(McbParamCommand::TorqueLimits { low, high })
            }
            Telecommand::CurrentLimits { low, high } => {
                self.send_mcb_param(McbParamCommand::CurrentLimits { low, high })
            }
            Telecommand::IgnoreLimits => self.send_mcb_ascii(McbAsciiCommand::IgnoreLimits),
            Telecommand::UseLimits => self.send_mcb_ascii(McbAsciiCommand::UseLimits),
            Telecommand::GetMcbEeprom => {
                if let Some(rejected) = self.reject_while_moving("MCB EEPROM request") {
                    return rejected;
                }
                self.send_mcb_ascii(McbAsciiCommand::GetEeprom)
            }
            Telecommand::GetMcbVoltages => match self.mcb.send_ascii(McbAsciiCommand::GetVoltages)
            {
                Ok(()) => (Severity::Nominal, summary(format_args!("Voltages requested"))),
                Err(e) => (
                    Severity::Error,
                    summary(format_args!("MCB GetVoltages failed: {}", e.name())),
                ),
            },
            Telecommand::SetProcessingMode(method) => self.set_param(
                rats::PROC_METHOD,
                ParamValue::Int(method as i32),
                "Processing mode",
            ),
            Telecommand::RealTimeMcbOn | Telecommand::RealTimeMcbOff => {
                if let Some(rejected) = self.reject_while_moving("Real-time MCB change") {
                    return rejected;
                }
                let on = tc == Telecommand::RealTimeMcbOn;
                self.set_param(rats::REAL_TIME_MCB, ParamValue::Bool(on), "Real-time MCB")
            }
            Telecommand::GetRatsEeprom => {
                if let Some(rejected) = self.reject_while_moving("RATS EEPROM request") {
                    return rejected;
                }
                let dump = self.config.to_bytes();
                match self.telemetry.send_tm(StateFlag::Fine, "RATS EEPROM", &[dump.as_slice()]) {
                    Ok(()) => (Severity::Nominal, summary(format_args!("RATS EEPROM sent"))),
                    Err(e) => (
                        Severity::Error,
                        summary(format_args!("RATS EEPROM TM failed: {}", e.name())),
                    ),
                }
            }
            Telecommand::Unknown(id) => {
                (Severity::Error, summary(format_args!("Unknown TC {}", id)))
            }
        }
    }

    fn request_length(&mut self, action: Action, revs: f32) -> (Severity, Summary) {
        let label = if action == Action::ReelOut { "Deploy" } else { "Retract" };

        if !self.state.permits_motion() {
            return (
                Severity::Error,
                summary(format_args!(
                    "{} rejected in {}",
                    label,
                    self.state.substate_name()
                )),
            );
        }
        if !revs.is_finite() || revs <= 0.0 {
            return (
                Severity::Error,
                summary(format_args!("{} length invalid", label)),
            );
        }

        if action == Action::ReelOut {
            self.deploy_length = revs;
        } else {
            self.retract_length = revs;
        }
        self.scheduler.arm(action, 0);
        (
            Severity::Nominal,
            summary(format_args!("{} {} revs queued", label, revs)),
        )
    }

    fn set_acceleration(
        &mut self,
        command: McbParamCommand,
        name: &str,
        value: f32,
    ) -> (Severity, Summary) {
        if let Err(e) = self.mcb.send_param(&command) {
            return (
                Severity::Error,
                summary(format_args!("MCB {} failed: {}", command.id().name(), e.name())),
            );
        }
        self.set_param(name, ParamValue::Float(value), command.id().name())
    }

    fn set_param(&mut self, name: &str, value: ParamValue, label: &str) -> (Severity, Summary) {
        match self.params.set(name, value) {
            Ok(()) => {
                self.apply_params();
                (Severity::Nominal, summary(format_args!("{} set", label)))
            }
            Err(e) => (Severity::Error, param_failure(label, e)),
        }
    }

    fn send_mcb_ascii(&mut self, command: McbAsciiCommand) -> (Severity, Summary) {
        match self.mcb.send_ascii(command) {
            Ok(()) => (
                Severity::Nominal,
                summary(format_args!("MCB {} sent", command.name())),
            ),
            Err(e) => (
                Severity::Error,
                summary(format_args!("MCB {} failed: {}", command.name(), e.name())),
            ),
        }
    }

    fn send_mcb_param(&mut self, command: McbParamCommand) -> (Severity, Summary) {
        let id = command.id();
        match self.mcb.send_param(&command) {
            Ok(()) => (
                Severity::Nominal,
                summary(format_args!("MCB {} sent", id.name())),
            ),
            Err(e) => (
                Severity::Error,
                summary(format_args!("MCB {} failed: {}", id.name(), e.name())),
            ),
        }
    }

    fn reject_while_moving(&self, what: &str) -> Option<(Severity, Summary)> {
        self.tracker.is_ongoing().then(|| {
            (
                Severity::Error,
                summary(format_args!("{} rejected, motion ongoing", what)),
            )
        })
    }
}

fn param_failure(label: &str, e: ParameterError) -> Summary {
    summary(format_args!("{} not stored: {}", label, e.name()))
}
