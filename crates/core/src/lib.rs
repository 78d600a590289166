//! strato_rats_core - Pure no_std logic for the RATS instrument controller
//!
//! This crate holds the parts of the instrument controller that carry real
//! sequencing and protocol logic, free of any platform, transport or logging
//! dependency so that everything can be exercised on the host.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives
//! - **Pure no_std**: No std library dependencies, no allocation
//! - **Trait abstractions**: MCB link, telemetry and time are injected via traits
//!
//! # Modules
//!
//! - [`traits`]: Platform-agnostic interfaces (TimeSource, McbLink, TelemetrySink)
//! - [`scheduler`]: Timed action flags polled by the mode state machines
//! - [`mcb`]: Motor control board protocol types and the motion tracker
//! - [`report`]: Bit-packed RATS report header and record accumulation
//! - [`mode`]: Instrument modes and their substates
//! - [`parameters`]: Parameter store and typed RATS configuration

#![no_std]

pub mod mcb;
pub mod mode;
pub mod parameters;
pub mod report;
pub mod scheduler;
pub mod traits;
