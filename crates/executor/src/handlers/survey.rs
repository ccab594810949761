//! Survey command handlers.

use std::sync::Arc;

use survey_core::SurveyId;

use crate::bridge::Primitives;
use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle SurveyList command.
pub fn survey_list(p: &Arc<Primitives>) -> Result<Output> {
    let surveys = convert_result(p.surveys.list())?;
    Ok(Output::Objects(surveys))
}

/// Handle SurveyGet command.
pub fn survey_get(p: &Arc<Primitives>, survey: SurveyId) -> Result<Output> {
    let out = convert_result(p.surveys.get(survey))?;
    Ok(Output::Object(out))
}

/// Handle SurveyCreate command.
pub fn survey_create(p: &Arc<Primitives>, payload: serde_json::Value) -> Result<Output> {
    let out = convert_result(p.surveys.create(payload))?;
    Ok(Output::Object(out))
}

/// Handle SurveyUpdate command.
pub fn survey_update(
    p: &Arc<Primitives>,
    survey: SurveyId,
    payload: serde_json::Value,
    partial: bool,
) -> Result<Output> {
    let out = convert_result(p.surveys.update(survey, payload, partial))?;
    Ok(Output::Object(out))
}

/// Handle SurveyDelete command.
pub fn survey_delete(p: &Arc<Primitives>, survey: SurveyId) -> Result<Output> {
    let cascaded = convert_result(p.surveys.delete(survey))?;
    Ok(Output::Deleted { cascaded })
}
