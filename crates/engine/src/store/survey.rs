use std::sync::Arc;

use survey_core::{JsonMap, SurveyId, SurveyResult};

use crate::database::Database;
use crate::records::RecordAccess;
use crate::serialize::SurveySerializer;

/// Survey CRUD, with control records kept in step with their survey.
#[derive(Clone)]
pub struct SurveyStore {
    db: Arc<Database>,
}

impl SurveyStore {
    /// Create a new SurveyStore backed by the given database.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Every survey, in id order
    pub fn list(&self) -> SurveyResult<Vec<JsonMap>> {
        let config = self.db.config();
        let routes = self.db.routes();
        let serializer = SurveySerializer::new(&config, &routes);

        self.db.transaction(|txn| {
            txn.surveys()?
                .iter()
                .map(|survey| serializer.to_representation(txn, survey))
                .collect()
        })
    }

    /// One survey with its control mapping
    pub fn get(&self, id: SurveyId) -> SurveyResult<JsonMap> {
        let config = self.db.config();
        let routes = self.db.routes();
        let serializer = SurveySerializer::new(&config, &routes);

        self.db.transaction(|txn| {
            let survey = txn.survey(id)?;
            serializer.to_representation(txn, &survey)
        })
    }

    /// Create a survey and its control records in one transaction.
    ///
    /// When the control mapping lacks a mandatory key nothing is written.
    pub fn create(&self, payload: serde_json::Value) -> SurveyResult<JsonMap> {
        let config = self.db.config();
        let routes = self.db.routes();
        let serializer = SurveySerializer::new(&config, &routes);

        let out = self.db.transaction(|txn| {
            let survey = serializer.create(txn, payload)?;
            serializer.to_representation(txn, &survey)
        })?;
        tracing::info!(target: "surveydb::survey", survey_id = ?out.get("id"), "Survey created");
        Ok(out)
    }

    /// Update survey attributes and control keys in one transaction
    pub fn update(
        &self,
        id: SurveyId,
        payload: serde_json::Value,
        partial: bool,
    ) -> SurveyResult<JsonMap> {
        let config = self.db.config();
        let routes = self.db.routes();
        let serializer = SurveySerializer::new(&config, &routes);

        self.db.transaction(|txn| {
            let (survey, outcome) = serializer.update(txn, id, payload, partial)?;
            if !outcome.is_empty() {
                tracing::debug!(
                    target: "surveydb::survey",
                    survey_id = %id,
                    created = ?outcome.created,
                    replaced = ?outcome.replaced,
                    deleted = ?outcome.deleted,
                    "Control keys changed"
                );
            }
            serializer.to_representation(txn, &survey)
        })
    }

    /// Delete a survey and every record it owns; returns the cascaded count
    pub fn delete(&self, id: SurveyId) -> SurveyResult<usize> {
        let removed = self.db.transaction(|txn| txn.delete_survey(id))?;
        tracing::info!(target: "surveydb::survey", survey_id = %id, removed, "Survey deleted");
        Ok(removed)
    }
}
