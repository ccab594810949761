//! Survey data and question data serializers
//!
//! Both apply [`FieldReshaper`] to a stored record. They differ in where the
//! record's association comes from (owning survey from the path, question
//! name from the query) and in how the detail link is built.

use super::context::RequestContext;
use super::reshape::{FieldReshaper, ValidatedRecord, URL_KEY};
use super::routes::{encode_name, Routes};
use crate::config::SurveyConfig;
use crate::records::RecordAccess;
use crate::registry::TypeRegistry;
use survey_concurrency::TransactionContext;
use survey_core::{
    EntityRef, JsonMap, QuestionRecord, RecordId, RecordType, SurveyError, SurveyResult,
    TypedRecord,
};

/// Apply a validated payload to an existing blob and type.
///
/// Full updates replace both; partial updates merge the blob and keep the
/// stored type unless a new one was supplied.
fn apply_update(
    record_type: &mut String,
    data: &mut survey_core::DataBlob,
    validated: ValidatedRecord,
    partial: bool,
) {
    if let Some(rt) = validated.record_type {
        *record_type = rt.name;
    }
    if partial {
        data.merge(validated.data);
    } else {
        *data = validated.data;
    }
}

fn required_type(validated: &ValidatedRecord) -> SurveyResult<RecordType> {
    validated
        .record_type
        .clone()
        .ok_or_else(|| SurveyError::invalid_field("type", "This field is required."))
}

// =============================================================================
// Survey data
// =============================================================================

/// Typed records nested under a survey
pub struct SurveyDataSerializer<'a> {
    reshaper: FieldReshaper<'a>,
    routes: &'a dyn Routes,
    control_type: &'a str,
}

impl<'a> SurveyDataSerializer<'a> {
    pub fn new(config: &'a SurveyConfig, routes: &'a dyn Routes) -> Self {
        Self {
            reshaper: FieldReshaper::from_config(config),
            routes,
            control_type: &config.control_type,
        }
    }

    /// Control records are owned by the survey's `control` mapping
    fn reject_control(&self, record_type: &str) -> SurveyResult<()> {
        if record_type == self.control_type {
            return Err(SurveyError::invalid_field(
                "type",
                format!("Records of type={} are managed through the survey control.", record_type),
            ));
        }
        Ok(())
    }

    /// Fetch a record of the survey named by `ctx`.
    ///
    /// A record that exists but belongs to another survey is not found.
    pub fn fetch(
        &self,
        txn: &TransactionContext,
        ctx: &RequestContext,
        id: RecordId,
    ) -> SurveyResult<TypedRecord> {
        let survey = ctx.survey_id()?;
        txn.survey(survey)?;
        match txn.survey_data(id) {
            Ok(record) if record.survey == survey => Ok(record),
            Ok(_) => Err(SurveyError::not_found(EntityRef::survey_data(Some(survey), id))),
            Err(e) if e.is_lookup() => {
                Err(SurveyError::not_found(EntityRef::survey_data(Some(survey), id)))
            }
            Err(e) => Err(e),
        }
    }

    /// Fold, validate and stage a new record under the context survey
    pub fn create(
        &self,
        txn: &mut TransactionContext,
        ctx: &RequestContext,
        payload: serde_json::Value,
    ) -> SurveyResult<TypedRecord> {
        let survey = ctx.survey_id()?;
        txn.survey(survey)?;
        let registry = TypeRegistry::load(txn)?;
        let validated = self.reshaper.to_internal(payload, &registry, false)?;
        let record_type = required_type(&validated)?;
        self.reject_control(&record_type.name)?;
        Ok(txn.insert_survey_data(survey, &record_type.name, validated.data))
    }

    /// Full (`partial = false`) or partial update of a record
    pub fn update(
        &self,
        txn: &mut TransactionContext,
        ctx: &RequestContext,
        id: RecordId,
        payload: serde_json::Value,
        partial: bool,
    ) -> SurveyResult<TypedRecord> {
        let mut record = self.fetch(txn, ctx, id)?;
        self.reject_control(&record.record_type)?;
        let registry = TypeRegistry::load(txn)?;
        let validated = self.reshaper.to_internal(payload, &registry, partial)?;
        apply_update(&mut record.record_type, &mut record.data, validated, partial);
        self.reject_control(&record.record_type)?;
        txn.save_survey_data(record.clone());
        Ok(record)
    }

    /// `type`, `_id`, the declared fields and `_url`
    pub fn to_representation(
        &self,
        registry: &TypeRegistry,
        record: &TypedRecord,
    ) -> SurveyResult<JsonMap> {
        let record_type = registry.resolve(&record.record_type)?;
        let mut out = self.reshaper.expand(record_type, record.id, &record.data);
        out.insert(
            URL_KEY.to_string(),
            self.routes
                .survey_data_detail(record.survey, record.id)
                .into(),
        );
        Ok(out)
    }
}

// =============================================================================
// Question data
// =============================================================================

/// Question metadata records scoped by name
pub struct QuestionDataSerializer<'a> {
    reshaper: FieldReshaper<'a>,
    routes: &'a dyn Routes,
}

impl<'a> QuestionDataSerializer<'a> {
    pub fn new(config: &'a SurveyConfig, routes: &'a dyn Routes) -> Self {
        Self {
            reshaper: FieldReshaper::from_config(config),
            routes,
        }
    }

    /// Fold, validate and stage a new record named by the `name` query parameter
    pub fn create(
        &self,
        txn: &mut TransactionContext,
        ctx: &RequestContext,
        payload: serde_json::Value,
    ) -> SurveyResult<QuestionRecord> {
        let registry = TypeRegistry::load(txn)?;
        let validated = self.reshaper.to_internal(payload, &registry, false)?;
        let record_type = required_type(&validated)?;
        Ok(txn.insert_question_data(ctx.question_name(), &record_type.name, validated.data))
    }

    /// Full or partial update; the name changes only when the query carries one
    pub fn update(
        &self,
        txn: &mut TransactionContext,
        ctx: &RequestContext,
        id: RecordId,
        payload: serde_json::Value,
        partial: bool,
    ) -> SurveyResult<QuestionRecord> {
        let mut record = txn.question_data(id)?;
        let registry = TypeRegistry::load(txn)?;
        let validated = self.reshaper.to_internal(payload, &registry, partial)?;
        apply_update(&mut record.record_type, &mut record.data, validated, partial);
        if let Some(name) = ctx.query_param(super::context::NAME_PARAM) {
            record.name = name.to_string();
        }
        txn.save_question_data(record.clone());
        Ok(record)
    }

    /// `type`, `_id`, the declared fields and `_url` (with `?name=` when named)
    pub fn to_representation(
        &self,
        registry: &TypeRegistry,
        record: &QuestionRecord,
    ) -> SurveyResult<JsonMap> {
        let record_type = registry.resolve(&record.record_type)?;
        let mut out = self.reshaper.expand(record_type, record.id, &record.data);
        out.insert(URL_KEY.to_string(), self.detail_url(record).into());
        Ok(out)
    }

    fn detail_url(&self, record: &QuestionRecord) -> String {
        let url = self.routes.question_data_detail(record.id);
        if record.name.is_empty() {
            url
        } else {
            format!("{}?name={}", url, encode_name(&record.name))
        }
    }
}
