//! # Error Types
//!
//! Structured error types for beam_core. These errors are designed to be
//! informative for both humans and LLMs, providing enough context to
//! understand and fix issues programmatically.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::errors::{BeamError, BeamResult};
//!
//! fn validate_length(length: f64) -> BeamResult<()> {
//!     if length <= 0.0 {
//!         return Err(BeamError::InvalidInput {
//!             field: "length".to_string(),
//!             value: length.to_string(),
//!             reason: "Beam length must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for beam_core operations
pub type BeamResult<T> = Result<T, BeamError>;

/// Structured error type for analysis operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by LLMs and other consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum BeamError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Material or section preset not found in database
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// A system of equations has no unique solution (unstable structure)
    #[error("Singular system in {context}: {reason}")]
    SingularSystem { context: String, reason: String },

    /// The stiffness method needs E and I but the section does not supply them
    #[error("Missing flexural rigidity: {reason}")]
    MissingRigidity { reason: String },

    /// The structure needs a method the caller has not enabled
    #[error("Analysis method unavailable: {reason}")]
    MethodUnavailable { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BeamError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        BeamError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        BeamError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        BeamError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a SingularSystem error
    pub fn singular_system(context: impl Into<String>, reason: impl Into<String>) -> Self {
        BeamError::SingularSystem {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingRigidity error
    pub fn missing_rigidity(reason: impl Into<String>) -> Self {
        BeamError::MissingRigidity {
            reason: reason.into(),
        }
    }

    /// Create a MethodUnavailable error
    pub fn method_unavailable(reason: impl Into<String>) -> Self {
        BeamError::MethodUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        BeamError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        BeamError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, BeamError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            BeamError::InvalidInput { .. } => "INVALID_INPUT",
            BeamError::MissingField { .. } => "MISSING_FIELD",
            BeamError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            BeamError::SingularSystem { .. } => "SINGULAR_SYSTEM",
            BeamError::MissingRigidity { .. } => "MISSING_RIGIDITY",
            BeamError::MethodUnavailable { .. } => "METHOD_UNAVAILABLE",
            BeamError::FileError { .. } => "FILE_ERROR",
            BeamError::FileLocked { .. } => "FILE_LOCKED",
            BeamError::SerializationError { .. } => "SERIALIZATION_ERROR",
            BeamError::VersionMismatch { .. } => "VERSION_MISMATCH",
            BeamError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
