//! RATS Instrument Parameter Definitions
//!
//! # Parameters
//!
//! - `RATS_DEP_VEL` / `RATS_RET_VEL` - Reel velocity in revs/min
//! - `RATS_DEP_ACC` / `RATS_RET_ACC` - Reel acceleration sent to the MCB
//! - `RATS_PROC_MTHD` - ECU data processing method
//! - `RATS_RT_MCB` - Forward MCB motion frames as they arrive
//! - `RATS_RPT_PERIOD` - Seconds between RATS reports
//! - `RATS_RPT_MAX` - ECU record count that triggers a report (**read-only**)

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::report::{NUM_ECU_REPORTS, RATS_REPORT_PERIOD_SECS};

pub const DEPLOY_VELOCITY: &str = "RATS_DEP_VEL";
pub const RETRACT_VELOCITY: &str = "RATS_RET_VEL";
pub const DEPLOY_ACCELERATION: &str = "RATS_DEP_ACC";
pub const RETRACT_ACCELERATION: &str = "RATS_RET_ACC";
pub const PROC_METHOD: &str = "RATS_PROC_MTHD";
pub const REAL_TIME_MCB: &str = "RATS_RT_MCB";
pub const REPORT_PERIOD: &str = "RATS_RPT_PERIOD";
pub const REPORT_MAX: &str = "RATS_RPT_MAX";

/// Default reel velocity in revs/min
const DEFAULT_VELOCITY: f32 = 50.0;

/// Default reel acceleration
const DEFAULT_ACCELERATION: f32 = 40.0;

const MIN_VELOCITY: f32 = 1.0;
const MAX_VELOCITY: f32 = 250.0;

const MIN_ACCELERATION: f32 = 1.0;
const MAX_ACCELERATION: f32 = 200.0;

const MIN_REPORT_PERIOD_S: i32 = 10;
const MAX_REPORT_PERIOD_S: i32 = 3600;

/// Size of the parameter dump sent in response to a RATS EEPROM request
pub const RATS_PARAMS_DUMP_BYTES: usize = 4 * 4 + 1 + 1 + 4 + 2;

/// Typed view over the RATS parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatsParams {
    pub deploy_velocity: f32,
    pub retract_velocity: f32,
    pub deploy_acceleration: f32,
    pub retract_acceleration: f32,
    /// Method handed to the ECU during configuration
    pub proc_method: u8,
    /// Send each MCB motion frame immediately instead of batching
    pub real_time_mcb: bool,
    pub report_period_s: u32,
    pub report_max_records: u16,
}

impl Default for RatsParams {
    fn default() -> Self {
        Self {
            deploy_velocity: DEFAULT_VELOCITY,
            retract_velocity: DEFAULT_VELOCITY,
            deploy_acceleration: DEFAULT_ACCELERATION,
            retract_acceleration: DEFAULT_ACCELERATION,
            proc_method: 0,
            real_time_mcb: false,
            report_period_s: RATS_REPORT_PERIOD_SECS,
            report_max_records: NUM_ECU_REPORTS as u16,
        }
    }
}

impl RatsParams {
    /// Register RATS parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        let defaults = Self::default();

        store.register(
            DEPLOY_VELOCITY,
            ParamValue::Float(defaults.deploy_velocity),
            ParamFlags::empty(),
        )?;
        store.register(
            RETRACT_VELOCITY,
            ParamValue::Float(defaults.retract_velocity),
            ParamFlags::empty(),
        )?;
        store.register(
            DEPLOY_ACCELERATION,
            ParamValue::Float(defaults.deploy_acceleration),
            ParamFlags::empty(),
        )?;
        store.register(
            RETRACT_ACCELERATION,
            ParamValue::Float(defaults.retract_acceleration),
            ParamFlags::empty(),
        )?;
        store.register(
            PROC_METHOD,
            ParamValue::Int(defaults.proc_method as i32),
            ParamFlags::empty(),
        )?;
        store.register(
            REAL_TIME_MCB,
            ParamValue::Bool(defaults.real_time_mcb),
            ParamFlags::empty(),
        )?;
        store.register(
            REPORT_PERIOD,
            ParamValue::Int(defaults.report_period_s as i32),
            ParamFlags::empty(),
        )?;

        // Sized against the report buffer; not changeable in flight
        store.register(
            REPORT_MAX,
            ParamValue::Int(defaults.report_max_records as i32),
            ParamFlags::READ_ONLY,
        )?;

        Ok(())
    }

    /// Load RATS parameters from the store, clamping out-of-range values
    pub fn from_store(store: &ParameterStore) -> Self {
        let defaults = Self::default();

        let float = |name: &str, default: f32, min: f32, max: f32| {
            match store.get(name).and_then(ParamValue::as_f32) {
                Some(v) if v.is_finite() => v.clamp(min, max),
                _ => default,
            }
        };

        let proc_method = match store.get(PROC_METHOD).and_then(ParamValue::as_i32) {
            Some(v) => v.clamp(0, u8::MAX as i32) as u8,
            None => defaults.proc_method,
        };

        let real_time_mcb = store
            .get(REAL_TIME_MCB)
            .and_then(ParamValue::as_bool)
            .unwrap_or(defaults.real_time_mcb);

        let report_period_s = match store.get(REPORT_PERIOD).and_then(ParamValue::as_i32) {
            Some(v) => v.clamp(MIN_REPORT_PERIOD_S, MAX_REPORT_PERIOD_S) as u32,
            None => defaults.report_period_s,
        };

        let report_max_records = match store.get(REPORT_MAX).and_then(ParamValue::as_i32) {
            Some(v) => v.clamp(1, NUM_ECU_REPORTS as i32) as u16,
            None => defaults.report_max_records,
        };

        Self {
            deploy_velocity: float(
                DEPLOY_VELOCITY,
                defaults.deploy_velocity,
                MIN_VELOCITY,
                MAX_VELOCITY,
            ),
            retract_velocity: float(
                RETRACT_VELOCITY,
                defaults.retract_velocity,
                MIN_VELOCITY,
                MAX_VELOCITY,
            ),
            deploy_acceleration: float(
                DEPLOY_ACCELERATION,
                defaults.deploy_acceleration,
                MIN_ACCELERATION,
                MAX_ACCELERATION,
            ),
            retract_acceleration: float(
                RETRACT_ACCELERATION,
                defaults.retract_acceleration,
                MIN_ACCELERATION,
                MAX_ACCELERATION,
            ),
            proc_method,
            real_time_mcb,
            report_period_s,
            report_max_records,
        }
    }

    /// Serialize for the parameter dump TM (little-endian)
    pub fn to_bytes(&self) -> [u8; RATS_PARAMS_DUMP_BYTES] {
        let mut out = [0u8; RATS_PARAMS_DUMP_BYTES];
        out[0..4].copy_from_slice(&self.deploy_velocity.to_le_bytes());
        out[4..8].copy_from_slice(&self.retract_velocity.to_le_bytes());
        out[8..12].copy_from_slice(&self.deploy_acceleration.to_le_bytes());
        out[12..16].copy_from_slice(&self.retract_acceleration.to_le_bytes());
        out[16] = self.proc_method;
        out[17] = self.real_time_mcb as u8;
        out[18..22].copy_from_slice(&self.report_period_s.to_le_bytes());
        out[22..24].copy_from_slice(&self.report_max_records.to_le_bytes());
        out
    }
}
