//! MCB motion tracker
//!
//! Owns the lifecycle of the one reel motion that may be outstanding at a
//! time: command transmission, acknowledgement with a single bounded resend,
//! accumulation of binary reel telemetry, and the outcome (completion, MCB
//! fault, overflow, ack loss or safety timeout).
//!
//! The tracker does not know about modes or logging. The flight sequencer
//! starts motions and polls [`MotionTracker::poll`] once per tick; the MCB
//! router feeds received messages through [`MotionTracker::handle_message`].

use core::fmt::{self, Write};

use heapless::{String, Vec};

use super::protocol::{
    McbAscii, McbAsciiCommand, McbBinaryKind, McbCommandId, McbMessage, McbParamCommand,
    MotionDirection, MotionFaultCodes, MOTION_FAULT_WORDS,
};
use crate::scheduler::{Action, ActionScheduler};
use crate::traits::{LinkError, McbLink, StateFlag, TelemetrySink};

/// Capacity of the motion telemetry buffer in bytes
pub const MCB_TM_BUFFER_SIZE: usize = 8192;

/// Ticks to wait for an MCB acknowledgement before resending
pub const MCB_RESEND_TIMEOUT_TICKS: u32 = 10;

/// Slack added to the nominal travel time of a motion, in seconds
pub const MOTION_TIMEOUT_MARGIN_S: u64 = 30;

const TM_MESSAGE_LEN: usize = 64;

/// How binary reel telemetry is downlinked during a motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum McbTmMode {
    /// Collect frames and send them once the motion ends
    #[default]
    Batched,
    /// Send every frame as soon as it arrives
    RealTime,
}

/// Upper bound on the duration of a motion.
///
/// Nominal travel time at `velocity` revs/min, rounded up to whole seconds,
/// plus [`MOTION_TIMEOUT_MARGIN_S`]. A non-positive velocity leaves only the
/// margin.
pub fn max_motion_duration_ms(length_revs: f32, velocity: f32) -> u64 {
    let travel_s = if velocity > 0.0 && length_revs.is_finite() {
        libm::ceilf(60.0 * libm::fabsf(length_revs) / velocity) as u64
    } else {
        0
    };
    (travel_s + MOTION_TIMEOUT_MARGIN_S) * 1000
}

/// One reel motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionRequest {
    pub direction: MotionDirection,
    pub target_length_revs: f32,
    /// Reel speed in revs/min
    pub velocity: f32,
    pub start_ms: u64,
    pub max_duration_ms: u64,
}

impl MotionRequest {
    /// Build a request whose duration bound follows from length and velocity
    pub fn new(direction: MotionDirection, length_revs: f32, velocity: f32, start_ms: u64) -> Self {
        Self {
            direction,
            target_length_revs: length_revs,
            velocity,
            start_ms,
            max_duration_ms: max_motion_duration_ms(length_revs, velocity),
        }
    }

    /// Directional MCB command for this motion
    pub fn command(&self) -> McbParamCommand {
        match self.direction {
            MotionDirection::Deploy => McbParamCommand::ReelOut {
                length_revs: self.target_length_revs,
                velocity: self.velocity,
            },
            MotionDirection::Retract => McbParamCommand::ReelIn {
                length_revs: self.target_length_revs,
                velocity: self.velocity,
            },
        }
    }

    /// Check whether the safety timeout has passed
    pub fn is_overdue(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) > self.max_duration_ms
    }
}

/// Why a motion ended abnormally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionFault {
    /// The MCB reported a fault
    McbFault(MotionFaultCodes),
    /// No acknowledgement after one resend
    AckTimeout,
    /// The MCB refused the motion command
    Rejected,
    /// Reel telemetry did not fit the tracking buffer
    BufferOverflow,
    /// No completion within the allowed duration
    DurationExceeded,
}

impl MotionFault {
    pub fn name(&self) -> &'static str {
        match self {
            MotionFault::McbFault(_) => "MCB fault",
            MotionFault::AckTimeout => "MCB ack timeout",
            MotionFault::Rejected => "MCB rejected command",
            MotionFault::BufferOverflow => "MCB TM buffer overflow",
            MotionFault::DurationExceeded => "motion timeout",
        }
    }
}

/// Result of polling the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionStatus {
    InProgress,
    Completed,
    Failed(MotionFault),
}

/// Reasons a motion could not be started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionError {
    /// Another motion is outstanding
    AlreadyOngoing,
    /// The instrument is not in a substate that allows motion
    NotPermitted,
    /// The motion command could not be sent
    SendFailed(LinkError),
}

impl MotionError {
    pub fn name(&self) -> &'static str {
        match self {
            MotionError::AlreadyOngoing => "motion already ongoing",
            MotionError::NotPermitted => "motion not permitted",
            MotionError::SendFailed(_) => "motion command not sent",
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::AlreadyOngoing => write!(f, "motion already ongoing"),
            MotionError::NotPermitted => write!(f, "motion not permitted in this state"),
            MotionError::SendFailed(e) => write!(f, "motion command not sent: {}", e),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AckState {
    Awaiting { resent: bool },
    Received,
}

#[derive(Debug, Clone, Copy)]
struct ActiveMotion {
    request: MotionRequest,
    tm_mode: McbTmMode,
    ack: AckState,
}

/// Tracks the single outstanding reel motion
pub struct MotionTracker {
    active: Option<ActiveMotion>,
    buffer: Vec<u8, MCB_TM_BUFFER_SIZE>,
    frame_count: u16,
    fault_codes: MotionFaultCodes,
    /// Outcome decided by a received message, returned by the next poll
    outcome: Option<MotionStatus>,
    last_link_error: Option<LinkError>,
}

impl MotionTracker {
    pub const fn new() -> Self {
        Self {
            active: None,
            buffer: Vec::new(),
            frame_count: 0,
            fault_codes: [0; MOTION_FAULT_WORDS],
            outcome: None,
            last_link_error: None,
        }
    }

    /// Check whether a motion is outstanding
    pub fn is_ongoing(&self) -> bool {
        self.active.is_some()
    }

    /// The outstanding request, if any
    pub fn request(&self) -> Option<&MotionRequest> {
        self.active.as_ref().map(|m| &m.request)
    }

    /// Binary frames received since the motion started
    pub fn frame_count(&self) -> u16 {
        self.frame_count
    }

    /// Bytes waiting in the tracking buffer
    pub fn buffered_bytes(&self) -> usize {
        self.buffer.len()
    }

    /// Fault words from the most recent MCB fault
    pub fn fault_codes(&self) -> &MotionFaultCodes {
        &self.fault_codes
    }

    /// Most recent transport failure, cleared on read
    pub fn take_link_error(&mut self) -> Option<LinkError> {
        self.last_link_error.take()
    }

    /// Start a motion.
    ///
    /// Rejected without side effects when a motion is already outstanding or
    /// `permitted` is false. On success the tracking buffer is reset, the
    /// directional command is sent and the ack timer is armed.
    pub fn start(
        &mut self,
        request: MotionRequest,
        permitted: bool,
        tm_mode: McbTmMode,
        link: &mut dyn McbLink,
        scheduler: &mut ActionScheduler,
    ) -> Result<(), MotionError> {
        if self.active.is_some() {
            return Err(MotionError::AlreadyOngoing);
        }
        if !permitted {
            return Err(MotionError::NotPermitted);
        }

        self.buffer.clear();
        self.frame_count = 0;
        self.fault_codes = [0; MOTION_FAULT_WORDS];
        self.outcome = None;

        link.send_param(&request.command())
            .map_err(MotionError::SendFailed)?;

        scheduler.cancel(Action::MotionStop);
        scheduler.arm(Action::ResendMotionCommand, MCB_RESEND_TIMEOUT_TICKS);
        self.active = Some(ActiveMotion {
            request,
            tm_mode,
            ack: AckState::Awaiting { resent: false },
        });
        Ok(())
    }

    /// Feed a message from the MCB router.
    ///
    /// Returns `true` when the message belonged to the current motion.
    pub fn handle_message(
        &mut self,
        message: &McbMessage<'_>,
        link: &mut dyn McbLink,
        sink: &mut dyn TelemetrySink,
        scheduler: &mut ActionScheduler,
    ) -> bool {
        match message {
            McbMessage::Ascii(McbAscii::MotionFinished) => {
                if self.active.is_none() {
                    return false;
                }
                self.finish(sink, scheduler, StateFlag::Fine, "MCB motion finished");
                self.outcome = Some(MotionStatus::Completed);
                true
            }
            McbMessage::Ascii(McbAscii::MotionFault(codes)) => {
                self.fault_codes = *codes;
                if self.active.is_none() {
                    return false;
                }
                self.finish(sink, scheduler, StateFlag::Crit, "MCB motion fault");
                self.outcome = Some(MotionStatus::Failed(MotionFault::McbFault(*codes)));
                true
            }
            McbMessage::Binary {
                kind: McbBinaryKind::MotionData,
                data,
            } => self.on_motion_data(data, link, sink, scheduler),
            McbMessage::Ack { command, accepted } => {
                self.on_ack(*command, *accepted, sink, scheduler)
            }
            _ => false,
        }
    }

    /// Advance the motion by one tick.
    pub fn poll(
        &mut self,
        now_ms: u64,
        link: &mut dyn McbLink,
        sink: &mut dyn TelemetrySink,
        scheduler: &mut ActionScheduler,
    ) -> MotionStatus {
        if let Some(outcome) = self.outcome.take() {
            return outcome;
        }

        let Some(active) = self.active.as_mut() else {
            return MotionStatus::Completed;
        };

        if scheduler.poll(Action::MotionStop) {
            self.finish(sink, scheduler, StateFlag::Fine, "MCB motion cancelled");
            return MotionStatus::Completed;
        }

        if let AckState::Awaiting { resent } = active.ack {
            if scheduler.poll(Action::ResendMotionCommand) {
                if !resent {
                    active.ack = AckState::Awaiting { resent: true };
                    let command = active.request.command();
                    scheduler.arm(Action::ResendMotionCommand, MCB_RESEND_TIMEOUT_TICKS);
                    if let Err(e) = link.send_param(&command) {
                        self.last_link_error = Some(e);
                    }
                    return MotionStatus::InProgress;
                }

                self.send_cancel(link);
                self.finish(sink, scheduler, StateFlag::Crit, "MCB ack timeout");
                return MotionStatus::Failed(MotionFault::AckTimeout);
            }
        }

        if active.request.is_overdue(now_ms) {
            self.send_cancel(link);
            self.finish(sink, scheduler, StateFlag::Crit, "MCB motion timeout");
            return MotionStatus::Failed(MotionFault::DurationExceeded);
        }

        MotionStatus::InProgress
    }

    /// Force the outstanding motion to stop.
    ///
    /// Sends a cancel and flushes collected telemetry only when a motion is
    /// outstanding, so repeated calls are harmless. Returns `true` if a
    /// motion was stopped.
    pub fn abort(
        &mut self,
        link: &mut dyn McbLink,
        sink: &mut dyn TelemetrySink,
        scheduler: &mut ActionScheduler,
    ) -> bool {
        self.outcome = None;
        if self.active.is_none() {
            return false;
        }
        self.send_cancel(link);
        self.finish(sink, scheduler, StateFlag::Warn, "MCB motion aborted");
        true
    }

    fn on_motion_data(
        &mut self,
        frame: &[u8],
        link: &mut dyn McbLink,
        sink: &mut dyn TelemetrySink,
        scheduler: &mut ActionScheduler,
    ) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if self.buffer.extend_from_slice(frame).is_err() {
            self.send_cancel(link);
            self.finish(sink, scheduler, StateFlag::Crit, "MCB TM buffer overflow");
            self.outcome = Some(MotionStatus::Failed(MotionFault::BufferOverflow));
            return true;
        }
        self.frame_count = self.frame_count.saturating_add(1);

        if active.tm_mode == McbTmMode::RealTime {
            self.flush(sink, StateFlag::Fine, "MCB TM");
        }
        true
    }

    fn on_ack(
        &mut self,
        command: McbCommandId,
        accepted: bool,
        sink: &mut dyn TelemetrySink,
        scheduler: &mut ActionScheduler,
    ) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if active.request.command().id() != command {
            return false;
        }

        if accepted {
            active.ack = AckState::Received;
            scheduler.cancel(Action::ResendMotionCommand);
        } else {
            self.finish(sink, scheduler, StateFlag::Warn, "MCB rejected motion command");
            self.outcome = Some(MotionStatus::Failed(MotionFault::Rejected));
        }
        true
    }

    fn send_cancel(&mut self, link: &mut dyn McbLink) {
        if let Err(e) = link.send_ascii(McbAsciiCommand::CancelMotion) {
            self.last_link_error = Some(e);
        }
    }

    /// End the motion: downlink what was collected and return to idle
    fn finish(
        &mut self,
        sink: &mut dyn TelemetrySink,
        scheduler: &mut ActionScheduler,
        flag: StateFlag,
        what: &str,
    ) {
        self.flush(sink, flag, what);
        self.active = None;
        scheduler.cancel(Action::ResendMotionCommand);
    }

    /// Send the buffered frames as one TM and reset the buffer
    fn flush(&mut self, sink: &mut dyn TelemetrySink, flag: StateFlag, what: &str) {
        let mut message = String::<TM_MESSAGE_LEN>::new();
        let _ = write!(message, "{}: {} frames", what, self.frame_count);

        if let Err(e) = sink.send_tm(flag, message.as_str(), &[self.buffer.as_slice()]) {
            self.last_link_error = Some(e);
        }
        self.buffer.clear();
    }
}

impl Default for MotionTracker {
    fn default() -> Self {
        Self::new()
    }
}
