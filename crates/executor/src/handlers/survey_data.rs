//! Survey data command handlers.
//!
//! Every command addresses records through their owning survey; a record
//! reached through another survey is reported as not found.

use std::sync::Arc;

use survey_core::{RecordId, SurveyId};

use crate::bridge::{survey_context, Primitives};
use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle SurveyDataList command.
pub fn survey_data_list(
    p: &Arc<Primitives>,
    survey: SurveyId,
    record_type: Option<String>,
) -> Result<Output> {
    let ctx = survey_context(survey);
    let records = convert_result(p.survey_data.list(&ctx, record_type.as_deref()))?;
    Ok(Output::Objects(records))
}

/// Handle SurveyDataGet command.
pub fn survey_data_get(p: &Arc<Primitives>, survey: SurveyId, record: RecordId) -> Result<Output> {
    let ctx = survey_context(survey);
    let out = convert_result(p.survey_data.get(&ctx, record))?;
    Ok(Output::Object(out))
}

/// Handle SurveyDataCreate command.
pub fn survey_data_create(
    p: &Arc<Primitives>,
    survey: SurveyId,
    payload: serde_json::Value,
) -> Result<Output> {
    let ctx = survey_context(survey);
    let out = convert_result(p.survey_data.create(&ctx, payload))?;
    Ok(Output::Object(out))
}

/// Handle SurveyDataUpdate command.
pub fn survey_data_update(
    p: &Arc<Primitives>,
    survey: SurveyId,
    record: RecordId,
    payload: serde_json::Value,
    partial: bool,
) -> Result<Output> {
    let ctx = survey_context(survey);
    let out = convert_result(p.survey_data.update(&ctx, record, payload, partial))?;
    Ok(Output::Object(out))
}

/// Handle SurveyDataDelete command.
pub fn survey_data_delete(
    p: &Arc<Primitives>,
    survey: SurveyId,
    record: RecordId,
) -> Result<Output> {
    let ctx = survey_context(survey);
    convert_result(p.survey_data.delete(&ctx, record))?;
    Ok(Output::Unit)
}
