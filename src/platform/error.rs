//! Platform error types
//!
//! This module defines error types for platform operations.

use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// All platform implementations map their driver-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformError {
    /// Parameter storage operation failed
    Storage(StorageError),
    /// ECU control operation failed
    Ecu(EcuError),
    /// Platform initialization failed
    InitializationFailed,
    /// Invalid configuration provided
    InvalidConfig,
    /// Resource not available
    ResourceUnavailable,
}

/// Parameter storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Nothing has been saved yet
    Empty,
    /// Read operation failed
    ReadFailed,
    /// Write operation failed
    WriteFailed,
    /// Stored data failed validation
    Corrupted,
}

/// ECU control errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcuError {
    /// ECU must be powered for this operation
    NotPowered,
    /// ECU refused the configuration
    ConfigRejected,
    /// No response from the ECU
    Timeout,
}

impl PlatformError {
    /// Short description for log lines
    pub fn name(&self) -> &'static str {
        match self {
            PlatformError::Storage(StorageError::Empty) => "storage empty",
            PlatformError::Storage(StorageError::ReadFailed) => "storage read failed",
            PlatformError::Storage(StorageError::WriteFailed) => "storage write failed",
            PlatformError::Storage(StorageError::Corrupted) => "storage corrupted",
            PlatformError::Ecu(EcuError::NotPowered) => "ECU not powered",
            PlatformError::Ecu(EcuError::ConfigRejected) => "ECU rejected configuration",
            PlatformError::Ecu(EcuError::Timeout) => "ECU timeout",
            PlatformError::InitializationFailed => "initialization failed",
            PlatformError::InvalidConfig => "invalid configuration",
            PlatformError::ResourceUnavailable => "resource unavailable",
        }
    }
}

impl From<StorageError> for PlatformError {
    fn from(e: StorageError) -> Self {
        PlatformError::Storage(e)
    }
}

impl From<EcuError> for PlatformError {
    fn from(e: EcuError) -> Self {
        PlatformError::Ecu(e)
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Storage(e) => write!(f, "Storage error: {:?}", e),
            PlatformError::Ecu(e) => write!(f, "ECU error: {:?}", e),
            PlatformError::InitializationFailed => write!(f, "Platform initialization failed"),
            PlatformError::InvalidConfig => write!(f, "Invalid configuration"),
            PlatformError::ResourceUnavailable => write!(f, "Resource not available"),
        }
    }
}
