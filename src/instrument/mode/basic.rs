//! Standby, LowPower, Safety and EndOfFlight
//!
//! These modes only report status. Safety and EndOfFlight stop the reel as
//! soon as they are entered.

use strato_rats_core::mode::{BasicSubstate, InstrumentMode, ModeState};
use strato_rats_core::scheduler::Action;

use crate::instrument::Instrument;
use crate::platform::InstrumentPlatform;
use crate::{log_info, log_warn};

impl<P: InstrumentPlatform> Instrument<P> {
    pub(in crate::instrument) fn poll_basic(
        &mut self,
        mode: InstrumentMode,
        substate: BasicSubstate,
    ) {
        let next = match substate {
            BasicSubstate::Entry => {
                log_info!("Entering {}", mode.name());
                if mode.stops_motion_on_entry()
                    && self
                        .tracker
                        .abort(&mut self.mcb, &mut self.telemetry, &mut self.scheduler)
                {
                    log_warn!("Motion stopped on {} entry", mode.name());
                }
                self.scheduler.arm(Action::SendStatus, 1);
                BasicSubstate::Loop
            }
            BasicSubstate::Loop => {
                self.service_status();
                BasicSubstate::Loop
            }
            BasicSubstate::Error | BasicSubstate::Shutdown | BasicSubstate::Exit => {
                self.shutdown();
                substate
            }
        };
        self.state = ModeState::basic(mode, next);
    }
}
