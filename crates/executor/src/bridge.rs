//! Bridge between commands and engine stores.
//!
//! [`Primitives`] bundles the database with one store per resource so
//! handlers can dispatch without rebuilding them per call.

use std::sync::Arc;

use survey_core::SurveyId;
use survey_engine::serialize::NAME_PARAM;
use survey_engine::{
    Database, QuestionStore, RecordTypeStore, RequestContext, SurveyDataStore, SurveyStore,
};

/// Engine handles shared by every handler.
pub struct Primitives {
    pub db: Arc<Database>,
    pub surveys: SurveyStore,
    pub survey_data: SurveyDataStore,
    pub questions: QuestionStore,
    pub record_types: RecordTypeStore,
}

impl Primitives {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            surveys: SurveyStore::new(db.clone()),
            survey_data: SurveyDataStore::new(db.clone()),
            questions: QuestionStore::new(db.clone()),
            record_types: RecordTypeStore::new(db.clone()),
            db,
        }
    }
}

/// Request context for routes nested under `survey`
pub fn survey_context(survey: SurveyId) -> RequestContext {
    RequestContext::for_survey(survey)
}

/// Request context carrying an optional `?name=` query parameter
pub fn question_context(name: Option<String>) -> RequestContext {
    match name {
        Some(name) => RequestContext::new().with_query(NAME_PARAM, name),
        None => RequestContext::new(),
    }
}
