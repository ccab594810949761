//! Record type command handlers.

use std::sync::Arc;

use survey_core::RecordType;

use crate::bridge::Primitives;
use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle RecordTypeList command.
pub fn record_type_list(p: &Arc<Primitives>) -> Result<Output> {
    let types = convert_result(p.record_types.list())?;
    Ok(Output::RecordTypes(types))
}

/// Handle RecordTypeGet command.
pub fn record_type_get(p: &Arc<Primitives>, record_type: String) -> Result<Output> {
    let rt = convert_result(p.record_types.get(&record_type))?;
    Ok(Output::RecordType(rt))
}

/// Handle RecordTypeDefine command.
pub fn record_type_define(
    p: &Arc<Primitives>,
    record_type: String,
    fields: Vec<String>,
) -> Result<Output> {
    let rt = convert_result(p.record_types.define(RecordType::new(record_type, fields)))?;
    Ok(Output::RecordType(rt))
}
