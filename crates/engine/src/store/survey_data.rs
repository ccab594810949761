use std::sync::Arc;

use survey_core::{JsonMap, RecordId, SurveyResult};

use crate::database::Database;
use crate::records::RecordAccess;
use crate::registry::TypeRegistry;
use crate::serialize::{RequestContext, SurveyDataSerializer};

/// Typed records nested under a survey.
///
/// Every call takes the request context carrying the owning survey id.
#[derive(Clone)]
pub struct SurveyDataStore {
    db: Arc<Database>,
}

impl SurveyDataStore {
    /// Create a new SurveyDataStore backed by the given database.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Records of the context survey, optionally restricted to one type
    pub fn list(&self, ctx: &RequestContext, record_type: Option<&str>) -> SurveyResult<Vec<JsonMap>> {
        let config = self.db.config();
        let routes = self.db.routes();
        let serializer = SurveyDataSerializer::new(&config, &routes);

        self.db.transaction(|txn| {
            let survey = ctx.survey_id()?;
            txn.survey(survey)?;
            let registry = TypeRegistry::load(txn)?;
            txn.filter_survey_data(survey, record_type)?
                .iter()
                .map(|record| serializer.to_representation(&registry, record))
                .collect()
        })
    }

    pub fn get(&self, ctx: &RequestContext, id: RecordId) -> SurveyResult<JsonMap> {
        let config = self.db.config();
        let routes = self.db.routes();
        let serializer = SurveyDataSerializer::new(&config, &routes);

        self.db.transaction(|txn| {
            let record = serializer.fetch(txn, ctx, id)?;
            let registry = TypeRegistry::load(txn)?;
            serializer.to_representation(&registry, &record)
        })
    }

    pub fn create(&self, ctx: &RequestContext, payload: serde_json::Value) -> SurveyResult<JsonMap> {
        let config = self.db.config();
        let routes = self.db.routes();
        let serializer = SurveyDataSerializer::new(&config, &routes);

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
        let serializer = SurveyDataSerializer::new(&config, &routes);

        self.db.transaction(|txn| {
            let record = serializer.update(txn, ctx, id, payload, partial)?;
            let registry = TypeRegistry::load(txn)?;
            serializer.to_representation(&registry, &record)
        })
    }

    pub fn delete(&self, ctx: &RequestContext, id: RecordId) -> SurveyResult<()> {
        let config = self.db.config();
        let routes = self.db.routes();
        let serializer = SurveyDataSerializer::new(&config, &routes);

        self.db.transaction(|txn| {
            let record = serializer.fetch(txn, ctx, id)?;
            txn.delete_survey_data(record.id);
            Ok(())
        })
    }
}
