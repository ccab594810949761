//! Survey serializer
//!
//! Survey rows carry only their own attributes; the API shape adds the
//! reconstructed `control` mapping and two links. Creating a survey validates
//! the control mapping before anything is staged, so a rejected create leaves
//! no survey behind.

use super::control::{ControlProjection, ControlUpdate};
use super::routes::Routes;
use crate::config::SurveyConfig;
use crate::records::RecordAccess;
use survey_concurrency::TransactionContext;
use survey_core::{JsonMap, Survey, SurveyError, SurveyId, SurveyResult};

/// Key of the control mapping in survey payloads
pub const CONTROL_KEY: &str = "control";
/// Key of the survey detail link
pub const URL_KEY: &str = "_url";
/// Key of the survey's data collection link
pub const DATA_URL_KEY: &str = "_data_url";

/// Parsed survey payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub control: Option<JsonMap>,
}

impl SurveyInput {
    /// Validate the shape of a survey payload.
    ///
    /// `id`, timestamps and `_`-prefixed keys are read-only and ignored.
    pub fn parse(payload: serde_json::Value) -> SurveyResult<Self> {
        let map = match payload {
            serde_json::Value::Object(map) => map,
            _ => {
                return Err(SurveyError::validation(
                    "Invalid data. Expected a dictionary.",
                ))
            }
        };

        let mut input = SurveyInput::default();
        for (key, value) in map {
            match key.as_str() {
                "name" => input.name = Some(string_field("name", value)?),
                "description" => input.description = Some(string_field("description", value)?),
                CONTROL_KEY => match value {
                    serde_json::Value::Object(control) => input.control = Some(control),
                    _ => {
                        return Err(SurveyError::invalid_field(
                            CONTROL_KEY,
                            "Expected a dictionary of items.",
                        ))
                    }
                },
                _ => {}
            }
        }
        Ok(input)
    }
}

fn string_field(field: &str, value: serde_json::Value) -> SurveyResult<String> {
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        _ => Err(SurveyError::invalid_field(field, "Not a valid string.")),
    }
}

/// Survey ↔ API shape
pub struct SurveySerializer<'a> {
    projection: ControlProjection<'a>,
    routes: &'a dyn Routes,
}

impl<'a> SurveySerializer<'a> {
    pub fn new(config: &'a SurveyConfig, routes: &'a dyn Routes) -> Self {
        Self {
            projection: ControlProjection::new(
                &config.control_type,
                &config.mandatory_control_fields,
            ),
            routes,
        }
    }

    /// Survey fields, `control`, `_url` and `_data_url`
    pub fn to_representation(
        &self,
        txn: &TransactionContext,
        survey: &Survey,
    ) -> SurveyResult<JsonMap> {
        self.projection.require_type(txn)?;
        let control = self.projection.project_out(txn, survey.id)?;

        let mut out = match serde_json::to_value(survey)? {
            serde_json::Value::Object(map) => map,
            _ => return Err(SurveyError::internal("survey did not serialize to an object")),
        };
        out.insert(
            CONTROL_KEY.to_string(),
            serde_json::Value::Object(control.into_iter().collect()),
        );
        out.insert(
            URL_KEY.to_string(),
            self.routes.survey_detail(survey.id).into(),
        );
        out.insert(
            DATA_URL_KEY.to_string(),
            self.routes.survey_data_list(survey.id).into(),
        );
        Ok(out)
    }

    /// Create a survey and its control records.
    ///
    /// Every check runs before the first write; the caller's transaction makes
    /// the two steps one unit.
    pub fn create(
        &self,
        txn: &mut TransactionContext,
        payload: serde_json::Value,
    ) -> SurveyResult<Survey> {
        let input = SurveyInput::parse(payload)?;
        let name = input
            .name
            .ok_or_else(|| SurveyError::invalid_field("name", "This field is required."))?;
        if name.trim().is_empty() {
            return Err(SurveyError::invalid_field("name", "This field may not be blank."));
        }
        let control = input
            .control
            .ok_or_else(|| SurveyError::invalid_field(CONTROL_KEY, "This field is required."))?;

        let entries = self.projection.prepare_create(control)?;
        self.projection.require_type(txn)?;

        let survey = txn.insert_survey(name, input.description.unwrap_or_default());
        self.projection.write_create(txn, survey.id, entries)?;
        tracing::debug!(target: "surveydb::survey", survey_id = %survey.id, "Created survey");
        Ok(survey)
    }

    /// Update survey attributes and apply a control update.
    ///
    /// A full update requires `name`; `control` is always optional and only
    /// the keys it mentions are touched.
    pub fn update(
        &self,
        txn: &mut TransactionContext,
        id: SurveyId,
        payload: serde_json::Value,
        partial: bool,
    ) -> SurveyResult<(Survey, ControlUpdate)> {
        let input = SurveyInput::parse(payload)?;
        if !partial && input.name.is_none() {
            return Err(SurveyError::invalid_field("name", "This field is required."));
        }
        if input.name.as_deref().map_or(false, |n| n.trim().is_empty()) {
            return Err(SurveyError::invalid_field("name", "This field may not be blank."));
        }

        let mut survey = txn.survey(id)?;
        if let Some(name) = input.name {
            survey.name = name;
        }
        if let Some(description) = input.description {
            survey.description = description;
        }
        survey.touch();
        txn.save_survey(survey.clone());

        let outcome = match input.control {
            Some(control) => self.projection.apply_update(txn, id, control)?,
            None => ControlUpdate::default(),
        };
        Ok((survey, outcome))
    }
}
