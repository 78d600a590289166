//! Parameter error types

/// Errors from parameter store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterError {
    /// Unknown parameter or name longer than the key capacity
    InvalidConfig,
    /// Store is full
    StoreFull,
    /// Parameter cannot be changed by telecommand
    ReadOnly,
    /// Value type differs from the registered type
    TypeMismatch,
}

impl core::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParameterError::InvalidConfig => write!(f, "invalid parameter name"),
            ParameterError::StoreFull => write!(f, "parameter store full"),
            ParameterError::ReadOnly => write!(f, "parameter is read-only"),
            ParameterError::TypeMismatch => write!(f, "parameter value has the wrong type"),
        }
    }
}

impl ParameterError {
    pub fn name(&self) -> &'static str {
        match self {
            ParameterError::InvalidConfig => "invalid name",
            ParameterError::StoreFull => "store full",
            ParameterError::ReadOnly => "read-only",
            ParameterError::TypeMismatch => "wrong type",
        }
    }
}
