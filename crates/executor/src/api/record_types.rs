//! Record type definitions.

use super::unexpected;
use crate::{Command, Executor, Output, Result};
use survey_core::RecordType;

/// Handle for record type definitions.
pub struct RecordTypes<'a> {
    executor: &'a Executor,
}

impl<'a> RecordTypes<'a> {
    pub(crate) fn new(executor: &'a Executor) -> Self {
        Self { executor }
    }

    /// All record types, in name order.
    pub fn list(&self) -> Result<Vec<RecordType>> {
        match self.executor.execute(Command::RecordTypeList)? {
            Output::RecordTypes(types) => Ok(types),
            _ => Err(unexpected("RecordTypeList")),
        }
    }

    pub fn get(&self, name: &str) -> Result<RecordType> {
        match self.executor.execute(Command::RecordTypeGet {
            record_type: name.to_string(),
        })? {
            Output::RecordType(rt) => Ok(rt),
            _ => Err(unexpected("RecordTypeGet")),
        }
    }

    /// Create a record type or replace its field list.
    pub fn define<I, S>(&self, name: &str, fields: I) -> Result<RecordType>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.executor.execute(Command::RecordTypeDefine {
            record_type: name.to_string(),
            fields: fields.into_iter().map(Into::into).collect(),
        })? {
            Output::RecordType(rt) => Ok(rt),
            _ => Err(unexpected("RecordTypeDefine")),
        }
    }
}
