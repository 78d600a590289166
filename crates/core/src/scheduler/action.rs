//! Action identifiers

/// Number of distinct actions (size of the flag table)
pub const NUM_ACTIONS: usize = 10;

/// Scheduled action identifiers
///
/// The discriminant indexes the scheduler's flag table, so the id space is
/// closed: an action that does not exist cannot be armed or polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Action {
    /// Periodic status TM
    SendStatus = 0,
    /// GPS wait reminder while time is not yet valid
    GpsWaitMsg = 1,
    /// Radio sync counter check during warmup
    RadioWaitMsg = 2,
    /// Radio link watchdog
    RadioSyncCheck = 3,
    /// Measurement telemetry emission
    StartTelemetry = 4,
    /// RATS report due check
    RatsReport = 5,
    /// Operator requested deploy
    ReelOut = 6,
    /// Operator requested retract
    ReelIn = 7,
    /// Operator cancelled the current motion
    MotionStop = 8,
    /// MCB acknowledgement timeout for the motion command
    ResendMotionCommand = 9,
}

impl Action {
    /// All actions in table order
    pub const ALL: [Action; NUM_ACTIONS] = [
        Action::SendStatus,
        Action::GpsWaitMsg,
        Action::RadioWaitMsg,
        Action::RadioSyncCheck,
        Action::StartTelemetry,
        Action::RatsReport,
        Action::ReelOut,
        Action::ReelIn,
        Action::MotionStop,
        Action::ResendMotionCommand,
    ];

    /// Index into the flag table
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Action name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Action::SendStatus => "SEND_STATUS",
            Action::GpsWaitMsg => "GPS_WAIT_MSG",
            Action::RadioWaitMsg => "RADIO_WAIT_MSG",
            Action::RadioSyncCheck => "RADIO_SYNC_CHECK",
            Action::StartTelemetry => "START_TELEMETRY",
            Action::RatsReport => "RATS_REPORT",
            Action::ReelOut => "REEL_OUT",
            Action::ReelIn => "REEL_IN",
            Action::MotionStop => "MOTION_STOP",
            Action::ResendMotionCommand => "RESEND_MOTION_COMMAND",
        }
    }
}
