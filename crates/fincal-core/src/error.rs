//! Error types for the Fincal library.
//!
//! Every failure in the date engine is an input or programming error, so
//! errors are surfaced immediately and carry the offending code or tag.

use thiserror::Error;

/// A specialized Result type for Fincal operations.
pub type FincalResult<T> = Result<T, FincalError>;

/// The main error type for Fincal operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FincalError {
    /// Malformed or zero-magnitude tenor code.
    #[error("Invalid tenor '{code}': {reason}")]
    InvalidTenor {
        /// The tenor code as supplied.
        code: String,
        /// Why the code was rejected.
        reason: String,
    },

    /// Calendar identifier not recognized by the holiday source.
    #[error("Invalid calendar '{code}': {reason}")]
    InvalidCalendar {
        /// The calendar identifier as supplied.
        code: String,
        /// Why the identifier was rejected.
        reason: String,
    },

    /// Convention tag with no defined formula for the requested operation.
    #[error("Unsupported convention '{convention}' for {operation}")]
    UnsupportedConvention {
        /// The convention tag.
        convention: String,
        /// The operation that has no formula for it.
        operation: String,
    },

    /// Explicitly unimplemented feature (e.g. IMM rolling).
    #[error("Not implemented: {feature}")]
    NotImplemented {
        /// The missing feature.
        feature: String,
    },

    /// Invalid date or date range.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Numeric or structural input outside the domain of an operation.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// Configuration error.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of the configuration error.
        reason: String,
    },
}

impl FincalError {
    /// Creates an invalid tenor error.
    #[must_use]
    pub fn invalid_tenor(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTenor {
            code: code.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid calendar error.
    #[must_use]
    pub fn invalid_calendar(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCalendar {
            code: code.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unsupported convention error.
    #[must_use]
    pub fn unsupported(convention: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::UnsupportedConvention {
            convention: convention.into(),
            operation: operation.into(),
        }
    }

    /// Creates a not implemented error.
    #[must_use]
    pub fn not_implemented(feature: impl Into<String>) -> Self {
        Self::NotImplemented {
            feature: feature.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
