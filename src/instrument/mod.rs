//! RATS instrument driver
//!
//! [`Instrument`] holds every piece of instrument state and the platform
//! links. The flight-software loop delivers external events between ticks
//! (telecommands, MCB messages, radio messages, GPS time validity, mode
//! requests) and calls [`Instrument::tick`] once per loop.
//!
//! # Tick order
//!
//! 1. Scheduler tick (countdowns advance, stale flags expire)
//! 2. Periodic RATS report check
//! 3. Poll of the active mode
//! 4. Parameter persistence when the store is dirty

mod mcb_router;
mod mode;
mod radio;
mod status;
mod telecommand;


pub use radio::RadioCounters;
pub use telecommand::{Severity, TcAck, Telecommand};

use strato_rats_core::mcb::{McbTmMode, MotionTracker};
use strato_rats_core::mode::{InstrumentMode, ModeState};
use strato_rats_core::parameters::{ParameterStore, RatsParams};
use strato_rats_core::report::{EcuStatus, RatsReportBuilder, ReportConfig};
use strato_rats_core::scheduler::{Action, ActionScheduler};

use crate::platform::{EcuControl, InstrumentPlatform, ParamStorage, Result, TimeSource};
use crate::{log_debug, log_error, log_info, log_warn};

/// Ticks between status TMs
pub const STATUS_MSG_PERIOD_TICKS: u32 = 300;

/// Ticks between "waiting for GPS time" reminders
pub const GPS_WAIT_TICKS: u32 = 5;

/// Radio messages required in each warmup wait
pub const RADIO_MSG_COUNT: u32 = 3;

/// Ticks between radio link watchdog checks
pub const RADIO_SYNC_CHECK_TICKS: u32 = 30;

/// Consecutive silent warmup checks before Flight gives up on the radio link
pub const RADIO_WARMUP_TIMEOUT_TICKS: u32 = 15;

/// Ticks between telemetry passes in Measure
pub const TELEMETRY_INTERVAL_TICKS: u32 = 60;

/// The RATS instrument
pub struct Instrument<P: InstrumentPlatform> {
    mcb: P::Mcb,
    telemetry: P::Telemetry,
    storage: P::Storage,
    ecu: P::Ecu,
    time: P::Time,

    scheduler: ActionScheduler,
    state: ModeState,
    tracker: MotionTracker,
    report: RatsReportBuilder,
    params: ParameterStore,
    config: RatsParams,
    radio: RadioCounters,

    /// Latest GPS time validity signal
    time_valid: bool,
    /// Time validity observed during the current Flight mode instance
    time_valid_latched: bool,
    deploy_length: f32,
    retract_length: f32,
    /// Last 56 V rail reading from the MCB
    v56_volts: f32,
    /// The shutdown sequence already ran for the current terminal substate
    shutdown_done: bool,
    ticks: u64,
}

impl<P: InstrumentPlatform> Instrument<P> {
    /// Claim the platform links
    ///
    /// # Errors
    ///
    /// Fails if the platform cannot hand out one of the links.
    pub fn new(platform: &mut P) -> Result<Self> {
        let time = platform.create_time()?;
        let now_s = time.now_s();
        let config = RatsParams::default();

        Ok(Self {
            mcb: platform.create_mcb_link()?,
            telemetry: platform.create_telemetry()?,
            storage: platform.create_storage()?,
            ecu: platform.create_ecu()?,
            time,
            scheduler: ActionScheduler::new(),
            state: ModeState::default(),
            tracker: MotionTracker::new(),
            report: RatsReportBuilder::new(report_config(&config), now_s),
            params: ParameterStore::new(),
            config,
            radio: RadioCounters::new(),
            time_valid: false,
            time_valid_latched: false,
            deploy_length: 0.0,
            retract_length: 0.0,
            v56_volts: 0.0,
            shutdown_done: false,
            ticks: 0,
        })
    }

    /// Load parameters and start in Standby
    pub fn setup(&mut self) {
        match self.storage.load(&mut self.params) {
            Ok(()) => log_info!("Loaded {} parameters", self.params.len()),
            Err(e) => log_warn!("Parameter load failed ({}), using defaults", e.name()),
        }
        if let Err(e) = RatsParams::register_defaults(&mut self.params) {
            log_error!("Parameter registration failed: {}", e.name());
        }
        self.apply_params();

        self.report = RatsReportBuilder::new(report_config(&self.config), self.time.now_s());
        self.scheduler.arm(Action::RatsReport, 1);
        self.state = ModeState::entry(InstrumentMode::Standby);
        self.shutdown_done = false;
        log_info!("RATS setup complete");
    }

    /// Run one loop iteration
    pub fn tick(&mut self) {
        self.ticks += 1;
        self.scheduler.tick();
        self.check_report();
        self.poll_mode();
        self.persist_params();
    }

    /// GPS time validity, delivered by the flight-software router
    pub fn set_time_valid(&mut self, valid: bool) {
        self.time_valid = valid;
        if valid && self.state.mode() == InstrumentMode::Flight {
            self.time_valid_latched = true;
        }
    }

    /// Active mode and substate
    pub fn state(&self) -> ModeState {
        self.state
    }

    pub fn mode(&self) -> InstrumentMode {
        self.state.mode()
    }

    /// Ticks run since start
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tracker(&self) -> &MotionTracker {
        &self.tracker
    }

    pub fn report(&self) -> &RatsReportBuilder {
        &self.report
    }

    pub fn scheduler(&self) -> &ActionScheduler {
        &self.scheduler
    }

    pub fn params(&self) -> &ParameterStore {
        &self.params
    }

    /// Typed view of the current parameters
    pub fn config(&self) -> &RatsParams {
        &self.config
    }

    pub fn radio(&self) -> &RadioCounters {
        &self.radio
    }

    /// Last 56 V rail reading in volts
    pub fn v56_volts(&self) -> f32 {
        self.v56_volts
    }

    pub fn mcb(&self) -> &P::Mcb {
        &self.mcb
    }

    pub fn mcb_mut(&mut self) -> &mut P::Mcb {
        &mut self.mcb
    }

    pub fn telemetry(&self) -> &P::Telemetry {
        &self.telemetry
    }

    pub fn telemetry_mut(&mut self) -> &mut P::Telemetry {
        &mut self.telemetry
    }

    pub fn storage(&self) -> &P::Storage {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut P::Storage {
        &mut self.storage
    }

    pub fn ecu(&self) -> &P::Ecu {
        &self.ecu
    }

    pub fn ecu_mut(&mut self) -> &mut P::Ecu {
        &mut self.ecu
    }

    pub fn time(&self) -> &P::Time {
        &self.time
    }

    /// Refresh the typed parameters after the store changed
    fn apply_params(&mut self) {
        self.config = RatsParams::from_store(&self.params);
        self.report.set_config(report_config(&self.config));
    }

    fn tm_mode(&self) -> McbTmMode {
        if self.config.real_time_mcb {
            McbTmMode::RealTime
        } else {
            McbTmMode::Batched
        }
    }

    fn ecu_status(&self) -> EcuStatus {
        EcuStatus {
            powered: self.ecu.is_powered(),
            v56_volts: self.v56_volts,
        }
    }

    /// Log a transport failure recorded by the motion tracker
    fn report_link_error(&mut self) {
        if let Some(e) = self.tracker.take_link_error() {
            log_error!("MCB motion link error: {}", e.name());
        }
    }

    fn persist_params(&mut self) {
        if !self.params.is_dirty() {
            return;
        }
        match self.storage.save(&self.params) {
            Ok(()) => {
                self.params.clear_dirty();
                log_debug!("Parameters saved");
            }
            Err(e) => log_error!("Parameter save failed: {}", e.name()),
        }
    }
}

fn report_config(config: &RatsParams) -> ReportConfig {
    ReportConfig {
        max_records: config.report_max_records,
        period_s: config.report_period_s,
    }
}
