//! Error types for survey storage and serialization
//!
//! `SurveyError` is the single error type shared by every internal crate.
//! Variants fall into three groups:
//!
//! | Group | Variants | Meaning |
//! |-------|----------|---------|
//! | Client input | `Validation` | payload rejected; never retried |
//! | Lookup | `NotFound`, `RecordTypeNotFound`, `MissingContext` | fatal for the request |
//! | System | `Storage`, `Serialization`, `TransactionAborted`, `Internal` | infrastructure failure |

use crate::types::EntityRef;
use thiserror::Error;

/// Result alias used throughout the workspace
pub type SurveyResult<T> = std::result::Result<T, SurveyError>;

/// Errors raised by the survey core
#[derive(Debug, Error)]
pub enum SurveyError {
    /// Payload failed structured validation
    #[error("{message}")]
    Validation {
        /// Human-readable message
        message: String,
        /// Mandatory control fields that were missing, if that was the cause
        missing: Vec<String>,
    },

    /// Addressed entity does not exist
    #[error("not found: {entity_ref}")]
    NotFound {
        /// The entity that was looked up
        entity_ref: EntityRef,
    },

    /// A record type referenced by name is not registered
    #[error("record type not found: {name}")]
    RecordTypeNotFound {
        /// Requested type name
        name: String,
    },

    /// Request context lacks a value the operation requires
    #[error("missing request context: {what}")]
    MissingContext {
        /// Name of the missing path or query parameter
        what: String,
    },

    /// Persistence failure
    #[error("storage error: {message}")]
    Storage {
        /// Description
        message: String,
        /// Underlying I/O error, if any
        #[source]
        source: Option<std::io::Error>,
    },

    /// Encoding or decoding failure
    #[error("serialization error: {message}")]
    Serialization {
        /// Description
        message: String,
    },

    /// A transaction was rolled back before commit
    #[error("transaction aborted: {reason}")]
    TransactionAborted {
        /// Why the transaction was aborted
        reason: String,
    },

    /// Invariant violation inside the core
    #[error("internal error: {message}")]
    Internal {
        /// Description
        message: String,
    },
}

impl SurveyError {
    /// Validation failure with a plain message
    pub fn validation(message: impl Into<String>) -> Self {
        SurveyError::Validation {
            message: message.into(),
            missing: Vec::new(),
        }
    }

    /// Validation failure attributed to a payload field
    pub fn invalid_field(field: &str, message: impl AsRef<str>) -> Self {
        SurveyError::validation(format!("{}: {}", field, message.as_ref()))
    }

    /// Validation failure for missing mandatory control fields
    pub fn missing_fields(missing: Vec<String>) -> Self {
        SurveyError::Validation {
            message: format!("Need fields {}", missing.join(", ")),
            missing,
        }
    }

    /// Entity lookup failure
    pub fn not_found(entity_ref: EntityRef) -> Self {
        SurveyError::NotFound { entity_ref }
    }

    /// Record type lookup failure
    pub fn record_type_not_found(name: impl Into<String>) -> Self {
        SurveyError::RecordTypeNotFound { name: name.into() }
    }

    /// Missing request context
    pub fn missing_context(what: impl Into<String>) -> Self {
        SurveyError::MissingContext { what: what.into() }
    }

    /// Storage failure without an I/O source
    pub fn storage(message: impl Into<String>) -> Self {
        SurveyError::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Serialization failure
    pub fn serialization(message: impl Into<String>) -> Self {
        SurveyError::Serialization {
            message: message.into(),
        }
    }

    /// Aborted transaction
    pub fn aborted(reason: impl Into<String>) -> Self {
        SurveyError::TransactionAborted {
            reason: reason.into(),
        }
    }

    /// Internal invariant violation
    pub fn internal(message: impl Into<String>) -> Self {
        SurveyError::Internal {
            message: message.into(),
        }
    }

    /// True for client input faults
    pub fn is_validation(&self) -> bool {
        matches!(self, SurveyError::Validation { .. })
    }

    /// True for referential faults
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            SurveyError::NotFound { .. }
                | SurveyError::RecordTypeNotFound { .. }
                | SurveyError::MissingContext { .. }
        )
    }
}

impl From<std::io::Error> for SurveyError {
    fn from(e: std::io::Error) -> Self {
        SurveyError::Storage {
            message: e.to_string(),
            source: Some(e),
        }
    }
}

impl From<serde_json::Error> for SurveyError {
    fn from(e: serde_json::Error) -> Self {
        SurveyError::serialization(e.to_string())
    }
}
