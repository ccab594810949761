//! Executor error type.
//!
//! Every failure surfaced by [`Executor::execute`](crate::Executor::execute)
//! is one of these variants. Each maps to an HTTP-style status code and a JSON
//! error body, so a transport layer can forward them unchanged.

use serde_json::json;

/// Errors returned by command execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Payload failed validation (client fault)
    #[error("{reason}")]
    Validation {
        reason: String,
        /// Mandatory fields that were missing, if that was the cause
        missing: Vec<String>,
    },

    /// Command arguments were malformed
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Survey does not exist
    #[error("survey not found: {survey}")]
    SurveyNotFound { survey: String },

    /// Survey data or question data record does not exist
    #[error("record not found: {record}")]
    RecordNotFound { record: String },

    /// Record type is not registered
    #[error("record type not found: {record_type}")]
    RecordTypeNotFound { record_type: String },

    /// A required path or query parameter was absent
    #[error("missing request context: {what}")]
    MissingContext { what: String },

    /// Transaction could not be committed
    #[error("conflict: {reason}")]
    Conflict { reason: String },

    /// Persistence I/O failure
    #[error("I/O error: {reason}")]
    Io { reason: String },

    /// Encoding or decoding failure
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    /// Invariant violation inside the database
    #[error("internal error: {reason}")]
    Internal { reason: String },
}

impl Error {
    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation { .. } | Error::InvalidInput { .. } => 400,
            Error::SurveyNotFound { .. }
            | Error::RecordNotFound { .. }
            | Error::RecordTypeNotFound { .. }
            | Error::MissingContext { .. } => 404,
            Error::Conflict { .. } => 409,
            Error::Io { .. } | Error::Serialization { .. } | Error::Internal { .. } => 500,
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Error::Validation { .. } => "validation_error",
            Error::InvalidInput { .. } => "invalid_input",
            Error::SurveyNotFound { .. } => "survey_not_found",
            Error::RecordNotFound { .. } => "record_not_found",
            Error::RecordTypeNotFound { .. } => "record_type_not_found",
            Error::MissingContext { .. } => "missing_context",
            Error::Conflict { .. } => "conflict",
            Error::Io { .. } => "io_error",
            Error::Serialization { .. } => "serialization_error",
            Error::Internal { .. } => "internal_error",
        }
    }

    /// JSON error body: `{"code", "detail"}`, plus `missing` for
    /// mandatory-field failures
    pub fn to_json(&self) -> serde_json::Value {
        let mut body = json!({
            "code": self.code(),
            "detail": self.to_string(),
        });
        if let (Error::Validation { missing, .. }, Some(obj)) = (self, body.as_object_mut()) {
            if !missing.is_empty() {
                obj.insert("missing".to_string(), json!(missing));
            }
        }
        body
    }
}
