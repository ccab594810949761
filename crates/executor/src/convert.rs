//! Error conversion from internal error types.
//!
//! This module provides conversions from [`SurveyError`] to the executor's
//! [`Error`] type.

use crate::Error;
use survey_core::{EntityRef, SurveyError};

/// Convert a SurveyError to an executor Error.
///
/// Lookup failures are split by the kind of entity that was addressed.
impl From<SurveyError> for Error {
    fn from(err: SurveyError) -> Self {
        match err {
            SurveyError::Validation { message, missing } => Error::Validation {
                reason: message,
                missing,
            },

            SurveyError::NotFound { entity_ref } => {
                let entity_str = entity_ref.to_string();
                match &entity_ref {
                    EntityRef::Survey { .. } => Error::SurveyNotFound { survey: entity_str },
                    EntityRef::RecordType { name } => Error::RecordTypeNotFound {
                        record_type: name.clone(),
                    },
                    EntityRef::SurveyData { .. } | EntityRef::QuestionData { .. } => {
                        Error::RecordNotFound { record: entity_str }
                    }
                }
            }

            SurveyError::RecordTypeNotFound { name } => {
                Error::RecordTypeNotFound { record_type: name }
            }

            SurveyError::MissingContext { what } => Error::MissingContext { what },

            SurveyError::TransactionAborted { reason } => Error::Conflict {
                reason: format!("Transaction aborted: {}", reason),
            },

            SurveyError::Storage { message, source } => {
                let reason = if let Some(ref src) = source {
                    format!("{}: {}", message, src)
                } else {
                    message
                };
                Error::Io { reason }
            }

            SurveyError::Serialization { message } => Error::Serialization { reason: message },

            SurveyError::Internal { message } => Error::Internal { reason: message },
        }
    }
}

/// Convert a survey_core::SurveyResult to an executor Result.
pub fn convert_result<T>(result: survey_core::SurveyResult<T>) -> crate::Result<T> {
    result.map_err(Error::from)
}
