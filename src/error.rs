//! Error types for the Teller Shift Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while opening, operating and
//! closing cash-drawer shifts.

use thiserror::Error;

use crate::models::ShiftState;
use crate::store::StoreError;

/// Broad category of an [`EngineError`].
///
/// Callers (the HTTP layer in particular) branch on the kind rather than on
/// individual variants or error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied malformed input and may retry after correcting it.
    Validation,
    /// A referenced shift or teller has no matching record.
    NotFound,
    /// The request conflicts with the current state of a shift.
    Conflict,
    /// Any other failure. Details are logged, never surfaced.
    Internal,
}

/// The main error type for the Teller Shift Engine.
///
/// # Example
///
/// ```
/// use teller_shift_engine::error::{EngineError, ErrorKind};
///
/// let error = EngineError::ShiftNotFound {
///     shift_code: "CAJ01-USU01-20250709".to_string(),
/// };
/// assert_eq!(error.to_string(), "Shift not found: CAJ01-USU01-20250709");
/// assert_eq!(error.kind(), ErrorKind::NotFound);
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An input field failed validation.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No shift exists with the given code.
    #[error("Shift not found: {shift_code}")]
    ShiftNotFound {
        /// The shift code that was looked up.
        shift_code: String,
    },

    /// No open shift exists for the register/teller pair.
    #[error("No active shift for register '{register_code}' and teller '{teller_code}'")]
    NoActiveShift {
        /// The register code.
        register_code: String,
        /// The teller code.
        teller_code: String,
    },

    /// The teller already has an open shift.
    #[error("Teller '{teller_code}' already has an open shift")]
    ShiftAlreadyOpen {
        /// The teller code.
        teller_code: String,
    },

    /// A shift with the generated code already exists.
    #[error("Shift code already in use: {shift_code}")]
    DuplicateShiftCode {
        /// The colliding shift code.
        shift_code: String,
    },

    /// A transaction was submitted against a shift that is not open.
    #[error("Cannot process a transaction against a closed shift: {shift_code}")]
    ShiftNotOpen {
        /// The shift code.
        shift_code: String,
    },

    /// A close was requested for a shift that is already closed.
    #[error("Shift already closed: {shift_code}")]
    ShiftAlreadyClosed {
        /// The shift code.
        shift_code: String,
    },

    /// The persistence store failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

impl EngineError {
    /// Creates a validation error for the given field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Validation { .. } => ErrorKind::Validation,
            EngineError::ShiftNotFound { .. } | EngineError::NoActiveShift { .. } => {
                ErrorKind::NotFound
            }
            EngineError::ShiftAlreadyOpen { .. }
            | EngineError::DuplicateShiftCode { .. }
            | EngineError::ShiftNotOpen { .. }
            | EngineError::ShiftAlreadyClosed { .. } => ErrorKind::Conflict,
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::Storage { .. } => ErrorKind::Internal,
        }
    }
}

impl From<StoreError> for EngineError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::OpenShiftExists { teller_code } => {
                EngineError::ShiftAlreadyOpen { teller_code }
            }
            StoreError::DuplicateShiftCode { shift_code } => {
                EngineError::DuplicateShiftCode { shift_code }
            }
            StoreError::ShiftNotFound { shift_code } => EngineError::ShiftNotFound { shift_code },
            StoreError::StateMismatch {
                shift_code, found, ..
            } => match found {
                ShiftState::Closed => EngineError::ShiftAlreadyClosed { shift_code },
                ShiftState::Open => EngineError::ShiftNotOpen { shift_code },
            },
            StoreError::Unavailable(message) => EngineError::Storage { message },
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
