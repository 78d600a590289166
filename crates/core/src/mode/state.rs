//! Mode and substate types
//!
//! The live substate is carried inside [`ModeState`], so a Flight substate
//! can never be paired with a non-flight mode and vice versa.

/// Top-level instrument modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrumentMode {
    Standby,
    Flight,
    LowPower,
    Safety,
    EndOfFlight,
}

impl InstrumentMode {
    pub const ALL: [InstrumentMode; 5] = [
        InstrumentMode::Standby,
        InstrumentMode::Flight,
        InstrumentMode::LowPower,
        InstrumentMode::Safety,
        InstrumentMode::EndOfFlight,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InstrumentMode::Standby => "Standby",
            InstrumentMode::Flight => "Flight",
            InstrumentMode::LowPower => "LowPower",
            InstrumentMode::Safety => "Safety",
            InstrumentMode::EndOfFlight => "EndOfFlight",
        }
    }

    /// Modes that must stop the reel as soon as they are entered
    pub fn stops_motion_on_entry(&self) -> bool {
        matches!(self, InstrumentMode::Safety | InstrumentMode::EndOfFlight)
    }
}

/// Where a manual motion returns once it completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    Measure,
    Idle,
}

impl Resume {
    /// Substate entered after a completed motion
    pub fn substate(&self) -> FlightSubstate {
        match self {
            Resume::Measure => FlightSubstate::Measure,
            Resume::Idle => FlightSubstate::Idle,
        }
    }
}

/// Flight mode substates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightSubstate {
    Entry,
    GpsWait,
    RadioWait1,
    ConfigEcu,
    RadioWait2,
    Measure,
    SendTelemetry,
    /// Manual hold between motions
    Idle,
    /// A reel motion is outstanding
    ManualMotion { resume: Resume },
    Error,
    Shutdown,
    Exit,
}

impl FlightSubstate {
    pub fn name(&self) -> &'static str {
        match self {
            FlightSubstate::Entry => "Entry",
            FlightSubstate::GpsWait => "GpsWait",
            FlightSubstate::RadioWait1 => "RadioWait1",
            FlightSubstate::ConfigEcu => "ConfigEcu",
            FlightSubstate::RadioWait2 => "RadioWait2",
            FlightSubstate::Measure => "Measure",
            FlightSubstate::SendTelemetry => "SendTelemetry",
            FlightSubstate::Idle => "Idle",
            FlightSubstate::ManualMotion { .. } => "ManualMotion",
            FlightSubstate::Error => "Error",
            FlightSubstate::Shutdown => "Shutdown",
            FlightSubstate::Exit => "Exit",
        }
    }

    /// Substates in which a telecommand may start a reel motion
    pub fn permits_motion(&self) -> bool {
        matches!(self, FlightSubstate::Measure | FlightSubstate::Idle)
    }

    /// Error, Shutdown and Exit all run the shutdown sequence
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FlightSubstate::Error | FlightSubstate::Shutdown | FlightSubstate::Exit
        )
    }

    /// Substates that wait on nothing and run in the tick they are entered
    pub fn is_transient(&self) -> bool {
        matches!(self, FlightSubstate::ConfigEcu)
    }
}

/// Substates shared by the non-flight modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicSubstate {
    Entry,
    Loop,
    Error,
    Shutdown,
    Exit,
}

impl BasicSubstate {
    pub fn name(&self) -> &'static str {
        match self {
            BasicSubstate::Entry => "Entry",
            BasicSubstate::Loop => "Loop",
            BasicSubstate::Error => "Error",
            BasicSubstate::Shutdown => "Shutdown",
            BasicSubstate::Exit => "Exit",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BasicSubstate::Error | BasicSubstate::Shutdown | BasicSubstate::Exit
        )
    }
}

/// Active mode together with its live substate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeState {
    Standby(BasicSubstate),
    Flight(FlightSubstate),
    LowPower(BasicSubstate),
    Safety(BasicSubstate),
    EndOfFlight(BasicSubstate),
}

impl ModeState {
    /// State of `mode` at its Entry substate
    pub fn entry(mode: InstrumentMode) -> Self {
        match mode {
            InstrumentMode::Standby => ModeState::Standby(BasicSubstate::Entry),
            InstrumentMode::Flight => ModeState::Flight(FlightSubstate::Entry),
            InstrumentMode::LowPower => ModeState::LowPower(BasicSubstate::Entry),
            InstrumentMode::Safety => ModeState::Safety(BasicSubstate::Entry),
            InstrumentMode::EndOfFlight => ModeState::EndOfFlight(BasicSubstate::Entry),
        }
    }

    /// State of `mode` at its Exit pseudostate
    pub fn exit(mode: InstrumentMode) -> Self {
        match mode {
            InstrumentMode::Flight => ModeState::Flight(FlightSubstate::Exit),
            other => ModeState::basic(other, BasicSubstate::Exit),
        }
    }

    /// Pair a non-flight mode with `substate`
    ///
    /// Flight has no basic substates; asking for one yields Flight's
    /// equivalent terminal or entry substate.
    pub fn basic(mode: InstrumentMode, substate: BasicSubstate) -> Self {
        match mode {
            InstrumentMode::Standby => ModeState::Standby(substate),
            InstrumentMode::LowPower => ModeState::LowPower(substate),
            InstrumentMode::Safety => ModeState::Safety(substate),
            InstrumentMode::EndOfFlight => ModeState::EndOfFlight(substate),
            InstrumentMode::Flight => ModeState::Flight(match substate {
                BasicSubstate::Entry => FlightSubstate::Entry,
                BasicSubstate::Loop => FlightSubstate::Measure,
                BasicSubstate::Error => FlightSubstate::Error,
                BasicSubstate::Shutdown => FlightSubstate::Shutdown,
                BasicSubstate::Exit => FlightSubstate::Exit,
            }),
        }
    }

    pub fn mode(&self) -> InstrumentMode {
        match self {
            ModeState::Standby(_) => InstrumentMode::Standby,
            ModeState::Flight(_) => InstrumentMode::Flight,
            ModeState::LowPower(_) => InstrumentMode::LowPower,
            ModeState::Safety(_) => InstrumentMode::Safety,
            ModeState::EndOfFlight(_) => InstrumentMode::EndOfFlight,
        }
    }

    /// Flight substate, if Flight is active
    pub fn flight(&self) -> Option<FlightSubstate> {
        match self {
            ModeState::Flight(substate) => Some(*substate),
            _ => None,
        }
    }

    /// Basic substate, if a non-flight mode is active
    pub fn basic_substate(&self) -> Option<BasicSubstate> {
        match self {
            ModeState::Standby(s)
            | ModeState::LowPower(s)
            | ModeState::Safety(s)
            | ModeState::EndOfFlight(s) => Some(*s),
            ModeState::Flight(_) => None,
        }
    }

    pub fn substate_name(&self) -> &'static str {
        match self {
            ModeState::Flight(substate) => substate.name(),
            ModeState::Standby(s)
            | ModeState::LowPower(s)
            | ModeState::Safety(s)
            | ModeState::EndOfFlight(s) => s.name(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        match self {
            ModeState::Flight(substate) => substate.is_terminal(),
            ModeState::Standby(s)
            | ModeState::LowPower(s)
            | ModeState::Safety(s)
            | ModeState::EndOfFlight(s) => s.is_terminal(),
        }
    }

    /// A motion may be started from the current state
    pub fn permits_motion(&self) -> bool {
        self.flight().is_some_and(|s| s.permits_motion())
    }
}

impl Default for ModeState {
    fn default() -> Self {
        ModeState::entry(InstrumentMode::Standby)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_and_exit_match_mode() {
        for mode in InstrumentMode::ALL {
            let entry = ModeState::entry(mode);
            assert_eq!(entry.mode(), mode);
            assert_eq!(entry.substate_name(), "Entry");
            assert!(!entry.is_terminal());

            let exit = ModeState::exit(mode);
            assert_eq!(exit.mode(), mode);
            assert!(exit.is_terminal());
        }
    }

    #[test]
    fn test_only_measure_and_idle_permit_motion() {
        assert!(ModeState::Flight(FlightSubstate::Measure).permits_motion());
        assert!(ModeState::Flight(FlightSubstate::Idle).permits_motion());
        assert!(!ModeState::Flight(FlightSubstate::GpsWait).permits_motion());
        assert!(!ModeState::Flight(FlightSubstate::ManualMotion {
            resume: Resume::Measure
        })
        .permits_motion());
        assert!(!ModeState::Standby(BasicSubstate::Loop).permits_motion());
    }

    #[test]
    fn test_resume_targets() {
        assert_eq!(Resume::Measure.substate(), FlightSubstate::Measure);
        assert_eq!(Resume::Idle.substate(), FlightSubstate::Idle);
    }

    #[test]
    fn test_substate_accessors() {
        let flight = ModeState::Flight(FlightSubstate::RadioWait2);
        assert_eq!(flight.flight(), Some(FlightSubstate::RadioWait2));
        assert_eq!(flight.basic_substate(), None);

        let safety = ModeState::basic(InstrumentMode::Safety, BasicSubstate::Loop);
        assert_eq!(safety.flight(), None);
        assert_eq!(safety.basic_substate(), Some(BasicSubstate::Loop));
        assert!(InstrumentMode::Safety.stops_motion_on_entry());
        assert!(!InstrumentMode::Standby.stops_motion_on_entry());
    }

    #[test]
    fn test_default_is_standby_entry() {
        assert_eq!(
            ModeState::default(),
            ModeState::Standby(BasicSubstate::Entry)
        );
    }
}
