//! Mode dispatch and transitions
//!
//! Exactly one mode poll runs per tick. A mode change always passes through
//! the current mode's Exit pseudostate, which stops any motion and powers
//! the ECU down before the new mode starts at Entry.

mod basic;
mod flight;

use strato_rats_core::mode::{BasicSubstate, InstrumentMode, ModeState};

use super::Instrument;
use crate::log_info;
use crate::platform::InstrumentPlatform;

impl<P: InstrumentPlatform> Instrument<P> {
    /// Switch to `mode`, running the current mode's Exit first
    ///
    /// Requesting the active mode is a no-op.
    pub fn request_mode(&mut self, mode: InstrumentMode) {
        let current = self.state.mode();
        if mode == current {
            log_info!("Already in {}", mode.name());
            return;
        }

        log_info!("Mode change {} -> {}", current.name(), mode.name());
        self.state = ModeState::exit(current);
        self.poll_mode();

        self.state = ModeState::entry(mode);
        self.shutdown_done = false;
        self.time_valid_latched = false;
    }

    /// Shutdown warning from the flight system
    ///
    /// The active mode moves to its Shutdown substate and runs the shutdown
    /// sequence on the next tick.
    pub fn shutdown_warning(&mut self) {
        log_info!("Shutdown warning received in {}", self.state.mode().name());
        if !self.state.is_terminal() {
            self.state = ModeState::basic(self.state.mode(), BasicSubstate::Shutdown);
        }
    }

    pub(super) fn poll_mode(&mut self) {
        match self.state {
            ModeState::Flight(substate) => self.poll_flight(substate),
            ModeState::Standby(substate) => self.poll_basic(InstrumentMode::Standby, substate),
            ModeState::LowPower(substate) => self.poll_basic(InstrumentMode::LowPower, substate),
            ModeState::Safety(substate) => self.poll_basic(InstrumentMode::Safety, substate),
            ModeState::EndOfFlight(substate) => {
                self.poll_basic(InstrumentMode::EndOfFlight, substate)
            }
        }
    }
}
