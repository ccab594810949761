//! Public types for the survey database API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// ============================================================================
// Identifiers and record shapes
// ============================================================================

pub use survey_core::{EntityRef, RecordId, RecordKind, SurveyId};
pub use survey_core::{QuestionRecord, RecordType, Survey, TypedRecord};

// JSON values and truthiness
pub use survey_core::{is_falsy, is_truthy, DataBlob, JsonMap};

// ============================================================================
// Configuration and request context
// ============================================================================

pub use survey_engine::{SurveyConfig, CONFIG_FILE, CONTROL, MANDATORY_CONTROL_FIELDS};
pub use survey_engine::{ApiRoutes, RequestContext, Routes};

// ============================================================================
// Command model
// ============================================================================

pub use survey_executor::{Command, DatabaseInfo, Output};
