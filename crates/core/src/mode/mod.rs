//! Instrument mode and substate types
//!
//! Pure types only. The transition logic for each mode lives in the
//! instrument crate, which owns the platform links the transitions drive.
//!
//! # Contents
//!
//! - [`InstrumentMode`]: top-level modes
//! - [`FlightSubstate`]: Flight sequencing, including the manual motion family
//! - [`BasicSubstate`]: substates of every other mode
//! - [`ModeState`]: active mode tagged with its live substate

mod state;

pub use state::{BasicSubstate, FlightSubstate, InstrumentMode, ModeState, Resume};
