//! Parameter management types and utilities
//!
//! This module provides the parameter store and the typed RATS parameter
//! view. Durable storage is provided by the platform.

pub mod error;
pub mod rats;
pub mod storage;

pub use error::ParameterError;
pub use rats::{RatsParams, RATS_PARAMS_DUMP_BYTES};
pub use storage::{ParamEntry, ParamFlags, ParamName, ParamValue, ParameterStore};
pub use storage::{MAX_PARAMS, PARAM_NAME_LEN};
