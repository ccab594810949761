//! Stored record shapes
//!
//! These are the rows persisted by the store. They are deliberately plain:
//! all API shaping (control projection, field reshaping, links) happens in
//! the engine's serialization layer.

use crate::json::DataBlob;
use crate::types::{RecordId, SurveyId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Survey metadata row
///
/// The `control` mapping exposed by the API is not stored here; it is
/// reconstructed from the survey's Control-type records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    /// Store-assigned id
    pub id: SurveyId,
    /// Display name
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Survey {
    /// Build a new survey row stamped with the current time
    pub fn new(id: SurveyId, name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Survey {
            id,
            name: name.into(),
            description: description.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Schema descriptor for a category of records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordType {
    /// Unique type name, e.g. "Control"
    #[serde(rename = "type")]
    pub name: String,
    /// Ordered list of recognised field names
    pub fields: Vec<String>,
}

impl RecordType {
    /// Create a record type
    pub fn new<I, S>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RecordType {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `field` is declared by this type
    pub fn declares(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }
}

/// A typed record owned by a survey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedRecord {
    /// Store-assigned id
    pub id: RecordId,
    /// Owning survey
    pub survey: SurveyId,
    /// Name of the record's type
    pub record_type: String,
    /// Opaque field blob
    pub data: DataBlob,
}

/// A question metadata record, scoped by name rather than by survey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Store-assigned id
    pub id: RecordId,
    /// Free-text scope identifier (may be empty)
    #[serde(default)]
    pub name: String,
    /// Name of the record's type
    pub record_type: String,
    /// Opaque field blob
    pub data: DataBlob,
}
