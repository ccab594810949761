//! Question data records.

use super::unexpected;
use crate::{Command, Executor, Output, Result};
use survey_core::{JsonMap, RecordId};

/// Handle for question data records.
///
/// Obtained via [`SurveyDb::questions()`](super::SurveyDb::questions). The
/// optional `name` arguments play the role of the `?name=` query parameter.
pub struct Questions<'a> {
    executor: &'a Executor,
}

impl<'a> Questions<'a> {
    pub(crate) fn new(executor: &'a Executor) -> Self {
        Self { executor }
    }

    pub fn list(&self, name: Option<&str>, record_type: Option<&str>) -> Result<Vec<JsonMap>> {
        match self.executor.execute(Command::QuestionDataList {
            name: name.map(str::to_string),
            record_type: record_type.map(str::to_string),
        })? {
            Output::Objects(list) => Ok(list),
            _ => Err(unexpected("QuestionDataList")),
        }
    }

    pub fn get(&self, record: RecordId) -> Result<JsonMap> {
        match self.executor.execute(Command::QuestionDataGet { record })? {
            Output::Object(out) => Ok(out),
            _ => Err(unexpected("QuestionDataGet")),
        }
    }

    pub fn create(&self, name: Option<&str>, payload: serde_json::Value) -> Result<JsonMap> {
        match self.executor.execute(Command::QuestionDataCreate {
            name: name.map(str::to_string),
            payload,
        })? {
            Output::Object(out) => Ok(out),
            _ => Err(unexpected("QuestionDataCreate")),
        }
    }

    /// Full (`partial = false`) or partial update; `name` renames when given.
    pub fn update(
        &self,
        record: RecordId,
        name: Option<&str>,
        payload: serde_json::Value,
        partial: bool,
    ) -> Result<JsonMap> {
        match self.executor.execute(Command::QuestionDataUpdate {
            record,
            name: name.map(str::to_string),
            payload,
            partial,
        })? {
            Output::Object(out) => Ok(out),
            _ => Err(unexpected("QuestionDataUpdate")),
        }
    }

    pub fn delete(&self, record: RecordId) -> Result<()> {
        match self.executor.execute(Command::QuestionDataDelete { record })? {
            Output::Unit => Ok(()),
            _ => Err(unexpected("QuestionDataDelete")),
        }
    }
}
