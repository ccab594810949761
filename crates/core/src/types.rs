//! Identifier and reference types
//!
//! Surveys and records are addressed by store-assigned numeric ids. Record
//! types are addressed by their unique name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a survey
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurveyId(u64);

impl SurveyId {
    /// Wrap a raw id
    pub const fn new(id: u64) -> Self {
        SurveyId(id)
    }

    /// Raw numeric id
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SurveyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SurveyId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(SurveyId)
    }
}

impl From<u64> for SurveyId {
    fn from(id: u64) -> Self {
        SurveyId(id)
    }
}

/// Identifier of a survey data record or a question data record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// Wrap a raw id
    pub const fn new(id: u64) -> Self {
        RecordId(id)
    }

    /// Raw numeric id
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(RecordId)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        RecordId(id)
    }
}

/// The four kinds of stored rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Survey metadata
    Survey,
    /// Record type schema descriptors
    RecordType,
    /// Typed records owned by a survey
    SurveyData,
    /// Question metadata records
    QuestionData,
}

impl RecordKind {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Survey => "survey",
            RecordKind::RecordType => "record_type",
            RecordKind::SurveyData => "survey_data",
            RecordKind::QuestionData => "question_data",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a single addressable entity, used in error reporting
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityRef {
    /// A survey
    Survey {
        /// Survey id
        id: SurveyId,
    },
    /// A record type, by name
    RecordType {
        /// Record type name
        name: String,
    },
    /// A survey data record, optionally scoped to its owning survey
    SurveyData {
        /// Owning survey as addressed by the caller
        survey: Option<SurveyId>,
        /// Record id
        id: RecordId,
    },
    /// A question data record
    QuestionData {
        /// Record id
        id: RecordId,
    },
}

impl EntityRef {
    /// Reference a survey
    pub fn survey(id: SurveyId) -> Self {
        EntityRef::Survey { id }
    }

    /// Reference a record type by name
    pub fn record_type(name: impl Into<String>) -> Self {
        EntityRef::RecordType { name: name.into() }
    }

    /// Reference a survey data record
    pub fn survey_data(survey: Option<SurveyId>, id: RecordId) -> Self {
        EntityRef::SurveyData { survey, id }
    }

    /// Reference a question data record
    pub fn question_data(id: RecordId) -> Self {
        EntityRef::QuestionData { id }
    }

    /// Kind of the referenced entity
    pub fn kind(&self) -> RecordKind {
        match self {
            EntityRef::Survey { .. } => RecordKind::Survey,
            EntityRef::RecordType { .. } => RecordKind::RecordType,
            EntityRef::SurveyData { .. } => RecordKind::SurveyData,
            EntityRef::QuestionData { .. } => RecordKind::QuestionData,
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Survey { id } => write!(f, "survey://{}", id),
            EntityRef::RecordType { name } => write!(f, "type://{}", name),
            EntityRef::SurveyData {
                survey: Some(survey),
                id,
            } => write!(f, "survey://{}/data/{}", survey, id),
            EntityRef::SurveyData { survey: None, id } => write!(f, "data://{}", id),
            EntityRef::QuestionData { id } => write!(f, "question://{}", id),
        }
    }
}
