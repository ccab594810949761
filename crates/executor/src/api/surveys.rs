//! Survey operations.

use super::{unexpected, SurveyDb};
use crate::{Command, Output, Result};
use survey_core::{JsonMap, SurveyId};

impl SurveyDb {
    /// Every survey with its control mapping and links.
    pub fn list_surveys(&self) -> Result<Vec<JsonMap>> {
        match self.executor.execute(Command::SurveyList)? {
            Output::Objects(list) => Ok(list),
            _ => Err(unexpected("SurveyList")),
        }
    }

    /// One survey.
    pub fn get_survey(&self, survey: SurveyId) -> Result<JsonMap> {
        match self.executor.execute(Command::SurveyGet { survey })? {
            Output::Object(out) => Ok(out),
            _ => Err(unexpected("SurveyGet")),
        }
    }

    /// Create a survey; `payload` carries `name`, `description` and `control`.
    pub fn create_survey(&self, payload: serde_json::Value) -> Result<JsonMap> {
        match self.executor.execute(Command::SurveyCreate { payload })? {
            Output::Object(out) => Ok(out),
            _ => Err(unexpected("SurveyCreate")),
        }
    }

    /// Full update (`PUT`).
    pub fn update_survey(&self, survey: SurveyId, payload: serde_json::Value) -> Result<JsonMap> {
        self.survey_update(survey, payload, false)
    }

    /// Partial update (`PATCH`).
    pub fn patch_survey(&self, survey: SurveyId, payload: serde_json::Value) -> Result<JsonMap> {
        self.survey_update(survey, payload, true)
    }

    fn survey_update(
        &self,
        survey: SurveyId,
        payload: serde_json::Value,
        partial: bool,
    ) -> Result<JsonMap> {
        match self.executor.execute(Command::SurveyUpdate {
            survey,
            payload,
            partial,
        })? {
            Output::Object(out) => Ok(out),
            _ => Err(unexpected("SurveyUpdate")),
        }
    }

    /// Delete a survey and its records; returns the number of records removed.
    pub fn delete_survey(&self, survey: SurveyId) -> Result<usize> {
        match self.executor.execute(Command::SurveyDelete { survey })? {
            Output::Deleted { cascaded } => Ok(cascaded),
            _ => Err(unexpected("SurveyDelete")),
        }
    }
}
