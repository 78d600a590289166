//! RATS science reports
//!
//! - [`header`]: bit-packed report header
//! - [`builder`]: ECU record accumulation and emission triggers

pub mod builder;
pub mod header;

pub use builder::{
    EcuRecord, EcuStatus, RatsReportBuilder, ReportConfig, ReportError, ECU_RECORD_SIZE_BYTES,
    MAX_ECU_RECORDS, NUM_ECU_REPORTS, RATS_REPORT_MAX_BYTES, RATS_REPORT_PERIOD_SECS,
};
pub use header::{
    volts_to_centivolts, RatsReportHeader, RatsReportHeaderBytes, RATS_HEADER_SIZE_BITS,
    RATS_HEADER_SIZE_BYTES, V56_MAX_CENTIVOLTS,
};
