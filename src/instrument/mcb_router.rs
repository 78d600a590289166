//! MCB message routing
//!
//! Messages that concern the reel motion go to the tracker. Replies to
//! housekeeping requests are logged and forwarded as TM here.

use strato_rats_core::mcb::{McbAscii, McbBinaryKind, McbMessage, RailVoltages};
use strato_rats_core::traits::StateFlag;

use super::Instrument;
use crate::platform::{InstrumentPlatform, TelemetrySink};
use crate::{log_debug, log_error, log_info, log_warn};

/// Size of the rail voltage TM payload (three little-endian f32)
pub const VOLTAGES_TM_BYTES: usize = 12;

fn voltages_to_bytes(v: &RailVoltages) -> [u8; VOLTAGES_TM_BYTES] {
    let mut out = [0u8; VOLTAGES_TM_BYTES];
    out[0..4].copy_from_slice(&v.v3.to_le_bytes());
    out[4..8].copy_from_slice(&v.v12.to_le_bytes());
    out[8..12].copy_from_slice(&v.v56.to_le_bytes());
    out
}

impl<P: InstrumentPlatform> Instrument<P> {
    /// Message received from the MCB
    pub fn handle_mcb_message(&mut self, message: McbMessage<'_>) {
        match message {
            McbMessage::Ascii(McbAscii::Text(line)) => log_info!("MCB: {}", line),
            McbMessage::Ascii(McbAscii::Voltages(v)) => {
                self.v56_volts = v.v56;
                log_info!("MCB voltages 3V3={} 12V={} 56V={}", v.v3, v.v12, v.v56);
                let payload = voltages_to_bytes(&v);
                if let Err(e) = self
                    .telemetry
                    .send_tm(StateFlag::Fine, "MCB voltages", &[payload.as_slice()])
                {
                    log_error!("MCB voltages TM failed: {}", e.name());
                }
            }
            McbMessage::Binary {
                kind: McbBinaryKind::Eeprom,
                data,
            } => {
                log_info!("MCB EEPROM dump, {} bytes", data.len());
                if let Err(e) = self.telemetry.send_tm(StateFlag::Fine, "MCB EEPROM", &[data]) {
                    log_error!("MCB EEPROM TM failed: {}", e.name());
                }
            }
            McbMessage::Ack { command, accepted } if !command.is_motion() => {
                if accepted {
                    log_debug!("MCB ack {}", command.name());
                } else {
                    log_error!("MCB NAK {}", command.name());
                    self.send_uplink_log(StateFlag::Warn, "MCB command rejected");
                }
            }
            _ => self.route_to_tracker(&message),
        }
    }

    fn route_to_tracker(&mut self, message: &McbMessage<'_>) {
        let handled = self.tracker.handle_message(
            message,
            &mut self.mcb,
            &mut self.telemetry,
            &mut self.scheduler,
        );
        if !handled {
            match message {
                McbMessage::Ascii(McbAscii::MotionFault(codes)) => log_error!(
                    "MCB fault with no motion outstanding: {} {}",
                    codes[0],
                    codes[1]
                ),
                McbMessage::Ascii(McbAscii::MotionFinished) => {
                    log_warn!("MCB motion finished with no motion outstanding")
                }
                McbMessage::Ack { command, .. } => {
                    log_warn!("Unexpected MCB ack {}", command.name())
                }
                _ => log_warn!("Unexpected MCB message"),
            }
        }
        self.report_link_error();
    }
}
