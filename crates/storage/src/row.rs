//! Row keys and row values
//!
//! Every stored record is addressed by a [`Key`] and held as a [`Row`]. Keys
//! order by kind first, then by id (or name for record types), so a scan of
//! one kind returns rows in insertion-id order.

use serde::{Deserialize, Serialize};
use survey_core::{
    QuestionRecord, RecordId, RecordKind, RecordType, Survey, SurveyError, SurveyId,
    SurveyResult, TypedRecord,
};

/// Address of one stored row
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Survey row
    Survey(SurveyId),
    /// Record type row, keyed by unique name
    RecordType(String),
    /// Survey data row
    SurveyData(RecordId),
    /// Question data row
    QuestionData(RecordId),
}

impl Key {
    /// Kind of row this key addresses
    pub fn kind(&self) -> RecordKind {
        match self {
            Key::Survey(_) => RecordKind::Survey,
            Key::RecordType(_) => RecordKind::RecordType,
            Key::SurveyData(_) => RecordKind::SurveyData,
            Key::QuestionData(_) => RecordKind::QuestionData,
        }
    }
}

/// A stored row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Row {
    /// Survey metadata
    Survey(Survey),
    /// Record type descriptor
    RecordType(RecordType),
    /// Survey-owned typed record
    SurveyData(TypedRecord),
    /// Question metadata record
    QuestionData(QuestionRecord),
}

impl Row {
    /// Key under which this row is stored
    pub fn key(&self) -> Key {
        match self {
            Row::Survey(s) => Key::Survey(s.id),
            Row::RecordType(t) => Key::RecordType(t.name.clone()),
            Row::SurveyData(r) => Key::SurveyData(r.id),
            Row::QuestionData(q) => Key::QuestionData(q.id),
        }
    }

    /// Kind of this row
    pub fn kind(&self) -> RecordKind {
        match self {
            Row::Survey(_) => RecordKind::Survey,
            Row::RecordType(_) => RecordKind::RecordType,
            Row::SurveyData(_) => RecordKind::SurveyData,
            Row::QuestionData(_) => RecordKind::QuestionData,
        }
    }

    /// Unwrap a survey row
    pub fn into_survey(self) -> SurveyResult<Survey> {
        match self {
            Row::Survey(s) => Ok(s),
            other => Err(wrong_kind(RecordKind::Survey, other.kind())),
        }
    }

    /// Unwrap a record type row
    pub fn into_record_type(self) -> SurveyResult<RecordType> {
        match self {
            Row::RecordType(t) => Ok(t),
            other => Err(wrong_kind(RecordKind::RecordType, other.kind())),
        }
    }

    /// Unwrap a survey data row
    pub fn into_survey_data(self) -> SurveyResult<TypedRecord> {
        match self {
            Row::SurveyData(r) => Ok(r),
            other => Err(wrong_kind(RecordKind::SurveyData, other.kind())),
        }
    }

    /// Unwrap a question data row
    pub fn into_question_data(self) -> SurveyResult<QuestionRecord> {
        match self {
            Row::QuestionData(q) => Ok(q),
            other => Err(wrong_kind(RecordKind::QuestionData, other.kind())),
        }
    }
}

fn wrong_kind(expected: RecordKind, actual: RecordKind) -> SurveyError {
    SurveyError::internal(format!(
        "row kind mismatch: expected {}, found {}",
        expected, actual
    ))
}
