//! Motor control board protocol and motion tracking
//!
//! # Components
//!
//! - [`protocol`]: Command and message vocabulary exchanged with the MCB
//! - [`tracker`]: Lifecycle of the single outstanding reel motion

pub mod protocol;
pub mod tracker;

pub use protocol::{
    McbAscii, McbAsciiCommand, McbBinaryKind, McbCommandId, McbMessage, McbParamCommand,
    MotionDirection, MotionFaultCodes, RailVoltages, MAX_MCB_BINARY, MOTION_FAULT_WORDS,
};
pub use tracker::{
    max_motion_duration_ms, McbTmMode, MotionError, MotionFault, MotionRequest, MotionStatus,
    MotionTracker, MCB_RESEND_TIMEOUT_TICKS, MCB_TM_BUFFER_SIZE, MOTION_TIMEOUT_MARGIN_S,
};
