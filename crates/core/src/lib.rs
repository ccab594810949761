//! Core types for SurveyDB
//!
//! This crate defines the foundational types shared by every layer:
//! - Ids and entity references (`SurveyId`, `RecordId`, `EntityRef`)
//! - Stored record shapes (`Survey`, `RecordType`, `TypedRecord`, `QuestionRecord`)
//! - The opaque data blob and JSON truthiness (`DataBlob`, `is_truthy`)
//! - The shared error type (`SurveyError`, `SurveyResult`)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod json;
pub mod record;
pub mod types;

pub use error::{SurveyError, SurveyResult};
pub use json::{is_falsy, is_truthy, DataBlob, JsonMap};
pub use record::{QuestionRecord, RecordType, Survey, TypedRecord};
pub use types::{EntityRef, RecordId, RecordKind, SurveyId};
