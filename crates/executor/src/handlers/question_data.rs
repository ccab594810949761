//! Question data command handlers.

use std::sync::Arc;

use survey_core::RecordId;

use crate::bridge::{question_context, Primitives};
use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle QuestionDataList command.
pub fn question_data_list(
    p: &Arc<Primitives>,
    name: Option<String>,
    record_type: Option<String>,
) -> Result<Output> {
    let ctx = question_context(name);
    let records = convert_result(p.questions.list(&ctx, record_type.as_deref()))?;
    Ok(Output::Objects(records))
}

/// Handle QuestionDataGet command.
pub fn question_data_get(p: &Arc<Primitives>, record: RecordId) -> Result<Output> {
    let out = convert_result(p.questions.get(record))?;
    Ok(Output::Object(out))
}

/// Handle QuestionDataCreate command.
pub fn question_data_create(
    p: &Arc<Primitives>,
    name: Option<String>,
    payload: serde_json::Value,
) -> Result<Output> {
    let ctx = question_context(name);
    let out = convert_result(p.questions.create(&ctx, payload))?;
    Ok(Output::Object(out))
}

/// Handle QuestionDataUpdate command.
pub fn question_data_update(
    p: &Arc<Primitives>,
    record: RecordId,
    name: Option<String>,
    payload: serde_json::Value,
    partial: bool,
) -> Result<Output> {
    let ctx = question_context(name);
    let out = convert_result(p.questions.update(&ctx, record, payload, partial))?;
    Ok(Output::Object(out))
}

/// Handle QuestionDataDelete command.
pub fn question_data_delete(p: &Arc<Primitives>, record: RecordId) -> Result<Output> {
    convert_result(p.questions.delete(record))?;
    Ok(Output::Unit)
}
