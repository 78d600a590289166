//! Core instrument infrastructure
//!
//! Logging macros shared by every instrument module. The sequencing and
//! protocol logic itself lives in `strato_rats_core`.

pub mod logging;
