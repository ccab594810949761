use std::sync::Arc;

use survey_core::{JsonMap, RecordId, SurveyResult};

use crate::database::Database;
use crate::records::RecordAccess;
use crate::registry::TypeRegistry;
use crate::serialize::{QuestionDataSerializer, RequestContext, NAME_PARAM};

/// Question metadata records, scoped by the `name` query parameter.
#[derive(Clone)]
pub struct QuestionStore {
    db: Arc<Database>,
}

impl QuestionStore {
    /// Create a new QuestionStore backed by the given database.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Records matching the context `name` (when given) and `record_type`
    pub fn list(&self, ctx: &RequestContext, record_type: Option<&str>) -> SurveyResult<Vec<JsonMap>> {
        let config = self.db.config();
        let routes = self.db.routes();
        let serializer = QuestionDataSerializer::new(&config, &routes);

        self.db.transaction(|txn| {
            let registry = TypeRegistry::load(txn)?;
            txn.filter_question_data(ctx.query_param(NAME_PARAM), record_type)?
                .iter()
                .map(|record| serializer.to_representation(&registry, record))
                .collect()
        })
    }

    pub fn get(&self, id: RecordId) -> SurveyResult<JsonMap> {
        let config = self.db.config();
        let routes = self.db.routes();
        let serializer = QuestionDataSerializer::new(&config, &routes);

        self.db.transaction(|txn| {
            let record = txn.question_data(id)?;
            let registry = TypeRegistry::load(txn)?;
            serializer.to_representation(&registry, &record)
        })
    }

    pub fn create(&self, ctx: &RequestContext, payload: serde_json::Value) -> SurveyResult<JsonMap> {
        let config = self.db.config();
        let routes = self.db.routes();
        let serializer = QuestionDataSerializer::new(&config, &routes);

        self.db.transaction(|txn| {
            let record = serializer.create(txn, ctx, payload)?;
            let registry = TypeRegistry::load(txn)?;
            serializer.to_representation(&registry, &record)
        })
    }

    /// Full (`PUT`) or partial (`PATCH`) update
    pub fn update(
        &self,
        ctx: &RequestContext,
        id: RecordId,
        payload: serde_json::Value,
        partial: bool,
    ) -> SurveyResult<JsonMap> {
        let config = self.db.config();
        let routes = self.db.routes();
        let serializer = QuestionDataSerializer::new(&config, &routes);

        self.db.transaction(|txn| {
            let record = serializer.update(txn, ctx, id, payload, partial)?;
            let registry = TypeRegistry::load(txn)?;
            serializer.to_representation(&registry, &record)
        })
    }

    pub fn delete(&self, id: RecordId) -> SurveyResult<()> {
        self.db.transaction(|txn| {
            txn.question_data(id)?;
            txn.delete_question_data(id);
            Ok(())
        })
    }
}
