use std::collections::HashSet;
use std::sync::Arc;

use survey_core::{RecordType, SurveyError, SurveyResult};

use crate::database::Database;
use crate::records::RecordAccess;

/// Record type definitions.
#[derive(Clone)]
pub struct RecordTypeStore {
    db: Arc<Database>,
}

impl RecordTypeStore {
    /// Create a new RecordTypeStore backed by the given database.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Every record type, in name order
    pub fn list(&self) -> SurveyResult<Vec<RecordType>> {
        self.db.transaction(|txn| txn.record_types())
    }

    pub fn get(&self, name: &str) -> SurveyResult<RecordType> {
        self.db.transaction(|txn| txn.record_type(name))
    }

    /// Create a record type or replace its field list.
    ///
    /// Stored blobs are not rewritten; fields dropped from the list simply
    /// stop appearing in representations.
    pub fn define(&self, record_type: RecordType) -> SurveyResult<RecordType> {
        validate_record_type(&record_type)?;
        self.db.transaction(|txn| {
            txn.save_record_type(record_type.clone());
            Ok(())
        })?;
        tracing::info!(
            target: "surveydb::types",
            record_type = %record_type.name,
            fields = record_type.fields.len(),
            "Record type defined"
        );
        Ok(record_type)
    }
}

fn validate_record_type(record_type: &RecordType) -> SurveyResult<()> {
    if record_type.name.trim().is_empty() {
        return Err(SurveyError::invalid_field("type", "This field may not be blank."));
    }
    let mut seen = HashSet::new();
    for field in &record_type.fields {
        if field.is_empty() {
            return Err(SurveyError::invalid_field("fields", "Field names may not be blank."));
        }
        if !seen.insert(field.as_str()) {
            return Err(SurveyError::invalid_field(
                "fields",
                format!("Duplicate field name: {}.", field),
            ));
        }
    }
    Ok(())
}
