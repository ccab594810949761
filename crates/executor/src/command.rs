//! Command model.
//!
//! One variant per API operation. Commands are serde-tagged by name so they
//! can be sent as JSON, e.g.
//!
//! ```text
//! {"command": "SurveyUpdate", "survey": 3, "payload": {"control": {"Status": ""}}, "partial": true}
//! ```

use serde::{Deserialize, Serialize};
use survey_core::{RecordId, SurveyId};

/// A single executable operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum Command {
    // Database
    Ping,
    Info,
    Flush,
    ConfigGet,

    // Surveys
    SurveyList,
    SurveyGet {
        survey: SurveyId,
    },
    SurveyCreate {
        payload: serde_json::Value,
    },
    SurveyUpdate {
        survey: SurveyId,
        payload: serde_json::Value,
        #[serde(default)]
        partial: bool,
    },
    SurveyDelete {
        survey: SurveyId,
    },

    // Survey data (nested under a survey)
    SurveyDataList {
        survey: SurveyId,
        #[serde(default, rename = "type")]
        record_type: Option<String>,
    },
    SurveyDataGet {
        survey: SurveyId,
        record: RecordId,
    },
    SurveyDataCreate {
        survey: SurveyId,
        payload: serde_json::Value,
    },
    SurveyDataUpdate {
        survey: SurveyId,
        record: RecordId,
        payload: serde_json::Value,
        #[serde(default)]
        partial: bool,
    },
    SurveyDataDelete {
        survey: SurveyId,
        record: RecordId,
    },

    // Question data
    QuestionDataList {
        #[serde(default)]
        name: Option<String>,
        #[serde(default, rename = "type")]
        record_type: Option<String>,
    },
    QuestionDataGet {
        record: RecordId,
    },
    QuestionDataCreate {
        #[serde(default)]
        name: Option<String>,
        payload: serde_json::Value,
    },
    QuestionDataUpdate {
        record: RecordId,
        #[serde(default)]
        name: Option<String>,
        payload: serde_json::Value,
        #[serde(default)]
        partial: bool,
    },
    QuestionDataDelete {
        record: RecordId,
    },

    // Record types
    RecordTypeList,
    RecordTypeGet {
        #[serde(rename = "type")]
        record_type: String,
    },
    RecordTypeDefine {
        #[serde(rename = "type")]
        record_type: String,
        fields: Vec<String>,
    },
}

impl Command {
    /// Variant name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Ping => "Ping",
            Command::Info => "Info",
            Command::Flush => "Flush",
            Command::ConfigGet => "ConfigGet",
            Command::SurveyList => "SurveyList",
            Command::SurveyGet { .. } => "SurveyGet",
            Command::SurveyCreate { .. } => "SurveyCreate",
            Command::SurveyUpdate { .. } => "SurveyUpdate",
            Command::SurveyDelete { .. } => "SurveyDelete",
            Command::SurveyDataList { .. } => "SurveyDataList",
            Command::SurveyDataGet { .. } => "SurveyDataGet",
            Command::SurveyDataCreate { .. } => "SurveyDataCreate",
            Command::SurveyDataUpdate { .. } => "SurveyDataUpdate",
            Command::SurveyDataDelete { .. } => "SurveyDataDelete",
            Command::QuestionDataList { .. } => "QuestionDataList",
            Command::QuestionDataGet { .. } => "QuestionDataGet",
            Command::QuestionDataCreate { .. } => "QuestionDataCreate",
            Command::QuestionDataUpdate { .. } => "QuestionDataUpdate",
            Command::QuestionDataDelete { .. } => "QuestionDataDelete",
            Command::RecordTypeList => "RecordTypeList",
            Command::RecordTypeGet { .. } => "RecordTypeGet",
            Command::RecordTypeDefine { .. } => "RecordTypeDefine",
        }
    }

    /// True for commands that stage writes
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Command::SurveyCreate { .. }
                | Command::SurveyUpdate { .. }
                | Command::SurveyDelete { .. }
                | Command::SurveyDataCreate { .. }
                | Command::SurveyDataUpdate { .. }
                | Command::SurveyDataDelete { .. }
                | Command::QuestionDataCreate { .. }
                | Command::QuestionDataUpdate { .. }
                | Command::QuestionDataDelete { .. }
                | Command::RecordTypeDefine { .. }
        )
    }
}
