//! Records nested under one survey.

use super::unexpected;
use crate::{Command, Executor, Output, Result};
use survey_core::{JsonMap, RecordId, SurveyId};

/// Handle for one survey's data records.
///
/// Obtained via [`SurveyDb::data()`](super::SurveyDb::data).
pub struct SurveyData<'a> {
    executor: &'a Executor,
    survey: SurveyId,
}

impl<'a> SurveyData<'a> {
    pub(crate) fn new(executor: &'a Executor, survey: SurveyId) -> Self {
        Self { executor, survey }
    }

    /// Records of this survey, optionally of one type.
    pub fn list(&self, record_type: Option<&str>) -> Result<Vec<JsonMap>> {
        match self.executor.execute(Command::SurveyDataList {
            survey: self.survey,
            record_type: record_type.map(str::to_string),
        })? {
            Output::Objects(list) => Ok(list),
            _ => Err(unexpected("SurveyDataList")),
        }
    }

    pub fn get(&self, record: RecordId) -> Result<JsonMap> {
        match self.executor.execute(Command::SurveyDataGet {
            survey: self.survey,
            record,
        })? {
            Output::Object(out) => Ok(out),
            _ => Err(unexpected("SurveyDataGet")),
        }
    }

    /// Create a record; flat fields are folded into its data blob.
    pub fn create(&self, payload: serde_json::Value) -> Result<JsonMap> {
        match self.executor.execute(Command::SurveyDataCreate {
            survey: self.survey,
            payload,
        })? {
            Output::Object(out) => Ok(out),
            _ => Err(unexpected("SurveyDataCreate")),
        }
    }

    /// Replace a record's type and blob.
    pub fn update(&self, record: RecordId, payload: serde_json::Value) -> Result<JsonMap> {
        self.send_update(record, payload, false)
    }

    /// Merge fields into a record's blob.
    pub fn patch(&self, record: RecordId, payload: serde_json::Value) -> Result<JsonMap> {
        self.send_update(record, payload, true)
    }

    fn send_update(
        &self,
        record: RecordId,
        payload: serde_json::Value,
        partial: bool,
    ) -> Result<JsonMap> {
        match self.executor.execute(Command::SurveyDataUpdate {
            survey: self.survey,
            record,
            payload,
            partial,
        })? {
            Output::Object(out) => Ok(out),
            _ => Err(unexpected("SurveyDataUpdate")),
        }
    }

    pub fn delete(&self, record: RecordId) -> Result<()> {
        match self.executor.execute(Command::SurveyDataDelete {
            survey: self.survey,
            record,
        })? {
            Output::Unit => Ok(()),
            _ => Err(unexpected("SurveyDataDelete")),
        }
    }
}
