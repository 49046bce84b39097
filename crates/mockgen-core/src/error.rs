//! Error types and error code constants for mockgen.
//!
//! This module provides a unified error type (`MockgenError`) that bridges
//! domain-specific errors from the host adapter and the file system into a
//! common format suitable for JSON output.
//!
//! ## Error Code Mapping
//!
//! - `2`: Invalid arguments (bad input from caller)
//! - `3`: Resolution errors (file not found, unparsable, no test class)
//! - `4`: Apply errors (host rejected an edit, file changed on disk)
//! - `10`: Internal errors (bugs, unexpected state)
//!
//! Recoverable scaffold conditions (underivable subject name, unresolved
//! subject, no injection constructor) are not errors; they are reported as
//! outcomes.

use std::fmt;

use thiserror::Error;

use crate::host::HostError;

pub use crate::types::Location;

// ============================================================================
// Output Error Codes
// ============================================================================

/// Error codes for JSON output.
///
/// These codes map to CLI exit codes and appear in JSON error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments from caller.
    InvalidArguments = 2,
    /// Resolution errors (file not found, parse failure, no test class).
    ResolutionError = 3,
    /// Apply errors (rejected edit, concurrent modification).
    ApplyError = 4,
    /// Internal errors (bugs, unexpected state).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for CLI output.
#[derive(Debug, Error)]
pub enum MockgenError {
    /// Invalid arguments from caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// Source file could not be parsed.
    #[error("parse error at {location}: {message}")]
    Parse { location: Location, message: String },

    /// The file declares no class to scaffold.
    #[error("no test class declared in {file}")]
    NoTestClass { file: String },

    /// The host rejected an element or an edit.
    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// Failed to write changes.
    #[error("apply error: {message}")]
    ApplyError {
        message: String,
        file: Option<String>,
    },

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    InternalError { message: String },
}

// ============================================================================
// Error Code Mapping
// ============================================================================

impl From<&MockgenError> for OutputErrorCode {
    fn from(err: &MockgenError) -> Self {
        match err {
            MockgenError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            MockgenError::FileNotFound { .. } => OutputErrorCode::ResolutionError,
            MockgenError::Parse { .. } => OutputErrorCode::ResolutionError,
            MockgenError::NoTestClass { .. } => OutputErrorCode::ResolutionError,
            MockgenError::Host(_) => OutputErrorCode::ApplyError,
            MockgenError::ApplyError { .. } => OutputErrorCode::ApplyError,
            MockgenError::InternalError { .. } => OutputErrorCode::InternalError,
        }
    }
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl MockgenError {
    /// Create an invalid arguments error.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        MockgenError::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<String>) -> Self {
        MockgenError::FileNotFound { path: path.into() }
    }

    /// Create an apply error for `file`.
    pub fn apply(message: impl Into<String>, file: impl Into<String>) -> Self {
        MockgenError::ApplyError {
            message: message.into(),
            file: Some(file.into()),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        MockgenError::InternalError {
            message: message.into(),
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> OutputErrorCode {
        OutputErrorCode::from(self)
    }
}

// ============================================================================
// Tests
// ============================================================================
