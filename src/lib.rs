#![cfg_attr(not(test), no_std)]

//! strato_rats - Instrument controller for the RATS tethered-reel payload
//!
//! This library wires the pure sequencing logic of `strato_rats_core` to the
//! instrument's links (motor control board, telemetry, parameter storage,
//! ECU) and drives it from the fixed-rate flight-software loop.

// Platform abstraction layer (links, storage, ECU power)
pub mod platform;

// Logging macros
pub mod core;

// Mode dispatch, telecommands, MCB routing, radio reception
pub mod instrument;

pub use instrument::{Instrument, Severity, TcAck, Telecommand};
pub use strato_rats_core as rats_core;
