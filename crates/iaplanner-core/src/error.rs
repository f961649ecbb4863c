//! Core error types for iaplanner-core.
//!
//! The engine is deliberately total: domain-expected conditions (missing ids,
//! infeasible schedules, inapplicable fixes) are returned as values, never as
//! errors. The error hierarchy below covers only boundary validation and
//! programmer-error conditions.

use thiserror::Error;

/// Core error type for iaplanner-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid date range
    #[error("Invalid date range: deadline ({deadline}) must not precede start ({start})")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        deadline: chrono::NaiveDate,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Empty required field
    #[error("Required field '{0}' is empty")]
    EmptyField(String),
}

impl ValidationError {
    /// Build an invalid-value error for a named field.
    pub fn invalid_value(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::invalid_value("hours", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'hours': must be greater than zero"
        );
    }

    #[test]
    fn test_core_error_from_validation() {
        let err: CoreError = ValidationError::EmptyField("title".to_string()).into();
        assert!(err.to_string().contains("title"));
    }
}
