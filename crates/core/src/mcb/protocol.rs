//! MCB command and message vocabulary
//!
//! Commands are what the instrument sends to the motor control board,
//! messages are what the MCB router delivers after the transport has
//! de-framed them.

/// Number of fault words reported by an MCB motion fault
pub const MOTION_FAULT_WORDS: usize = 8;

/// Largest binary frame the MCB sends in one message
pub const MAX_MCB_BINARY: usize = 512;

/// Fault words captured from an MCB motion fault line
pub type MotionFaultCodes = [u16; MOTION_FAULT_WORDS];

/// Parameterless ASCII commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McbAsciiCommand {
    CancelMotion,
    ZeroReel,
    IgnoreLimits,
    UseLimits,
    GetEeprom,
    GetVoltages,
}

impl McbAsciiCommand {
    pub fn name(&self) -> &'static str {
        match self {
            McbAsciiCommand::CancelMotion => "cancel motion",
            McbAsciiCommand::ZeroReel => "zero reel",
            McbAsciiCommand::IgnoreLimits => "ignore limits",
            McbAsciiCommand::UseLimits => "use limits",
            McbAsciiCommand::GetEeprom => "get EEPROM",
            McbAsciiCommand::GetVoltages => "get voltages",
        }
    }
}

/// Identifies a parametrized command in MCB acknowledgements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McbCommandId {
    ReelOut,
    ReelIn,
    OutAcceleration,
    InAcceleration,
    TorqueLimits,
    CurrentLimits,
}

impl McbCommandId {
    pub fn name(&self) -> &'static str {
        match self {
            McbCommandId::ReelOut => "reel out",
            McbCommandId::ReelIn => "reel in",
            McbCommandId::OutAcceleration => "out acceleration",
            McbCommandId::InAcceleration => "in acceleration",
            McbCommandId::TorqueLimits => "torque limits",
            McbCommandId::CurrentLimits => "current limits",
        }
    }

    /// Commands that start a reel motion
    pub fn is_motion(&self) -> bool {
        matches!(self, McbCommandId::ReelOut | McbCommandId::ReelIn)
    }
}

/// Commands carrying numeric parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum McbParamCommand {
    /// Deploy `length_revs` at `velocity` revs/min
    ReelOut { length_revs: f32, velocity: f32 },
    /// Retract `length_revs` at `velocity` revs/min
    ReelIn { length_revs: f32, velocity: f32 },
    OutAcceleration(f32),
    InAcceleration(f32),
    TorqueLimits { low: f32, high: f32 },
    CurrentLimits { low: f32, high: f32 },
}

impl McbParamCommand {
    /// Identifier echoed back in the MCB acknowledgement
    pub fn id(&self) -> McbCommandId {
        match self {
            McbParamCommand::ReelOut { .. } => McbCommandId::ReelOut,
            McbParamCommand::ReelIn { .. } => McbCommandId::ReelIn,
            McbParamCommand::OutAcceleration(_) => McbCommandId::OutAcceleration,
            McbParamCommand::InAcceleration(_) => McbCommandId::InAcceleration,
            McbParamCommand::TorqueLimits { .. } => McbCommandId::TorqueLimits,
            McbParamCommand::CurrentLimits { .. } => McbCommandId::CurrentLimits,
        }
    }
}

/// Reel motion direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionDirection {
    /// Reel out
    Deploy,
    /// Reel in
    Retract,
}

impl MotionDirection {
    pub fn name(&self) -> &'static str {
        match self {
            MotionDirection::Deploy => "deploy",
            MotionDirection::Retract => "retract",
        }
    }
}

/// Rail voltages reported by the MCB
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RailVoltages {
    pub v3: f32,
    pub v12: f32,
    pub v56: f32,
}

/// ASCII status lines from the MCB
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum McbAscii<'a> {
    /// The commanded motion ran to completion
    MotionFinished,
    /// The MCB aborted the motion
    MotionFault(MotionFaultCodes),
    /// Reply to [`McbAsciiCommand::GetVoltages`]
    Voltages(RailVoltages),
    /// Any other status line
    Text(&'a str),
}

/// Kind of binary frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McbBinaryKind {
    /// Periodic reel telemetry while a motion runs
    MotionData,
    /// Reply to [`McbAsciiCommand::GetEeprom`]
    Eeprom,
}

/// Messages delivered by the MCB router
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum McbMessage<'a> {
    Ascii(McbAscii<'a>),
    Ack { command: McbCommandId, accepted: bool },
    Binary { kind: McbBinaryKind, data: &'a [u8] },
}
