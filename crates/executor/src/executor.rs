//! Command dispatch.

use std::sync::Arc;

use survey_engine::Database;

use crate::bridge::Primitives;
use crate::handlers;
use crate::{Command, Output, Result};

/// Executes [`Command`]s against one database.
#[derive(Clone)]
pub struct Executor {
    primitives: Arc<Primitives>,
}

impl Executor {
    /// Create an executor over the given database.
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            primitives: Arc::new(Primitives::new(db)),
        }
    }

    /// The underlying database.
    pub fn database(&self) -> &Arc<Database> {
        &self.primitives.db
    }

    /// Execute one command.
    ///
    /// Each command runs in its own transaction; a failed command leaves the
    /// store unchanged.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        let name = cmd.name();
        tracing::debug!(target: "surveydb::executor", command = name, "Executing");
        let result = self.dispatch(cmd);
        if let Err(ref e) = result {
            tracing::debug!(
                target: "surveydb::executor",
                command = name,
                status = e.status_code(),
                error = %e,
                "Command failed"
            );
        }
        result
    }

    fn dispatch(&self, cmd: Command) -> Result<Output> {
        let p = &self.primitives;
        match cmd {
            Command::Ping => handlers::database::ping(),
            Command::Info => handlers::database::info(p),
            Command::Flush => handlers::database::flush(p),
            Command::ConfigGet => handlers::database::config_get(p),

            Command::SurveyList => handlers::survey::survey_list(p),
            Command::SurveyGet { survey } => handlers::survey::survey_get(p, survey),
            Command::SurveyCreate { payload } => handlers::survey::survey_create(p, payload),
            Command::SurveyUpdate {
                survey,
                payload,
                partial,
            } => handlers::survey::survey_update(p, survey, payload, partial),
            Command::SurveyDelete { survey } => handlers::survey::survey_delete(p, survey),

            Command::SurveyDataList {
                survey,
                record_type,
            } => handlers::survey_data::survey_data_list(p, survey, record_type),
            Command::SurveyDataGet { survey, record } => {
                handlers::survey_data::survey_data_get(p, survey, record)
            }
            Command::SurveyDataCreate { survey, payload } => {
                handlers::survey_data::survey_data_create(p, survey, payload)
            }
            Command::SurveyDataUpdate {
                survey,
                record,
                payload,
                partial,
            } => handlers::survey_data::survey_data_update(p, survey, record, payload, partial),
            Command::SurveyDataDelete { survey, record } => {
                handlers::survey_data::survey_data_delete(p, survey, record)
            }

            Command::QuestionDataList { name, record_type } => {
                handlers::question_data::question_data_list(p, name, record_type)
            }
            Command::QuestionDataGet { record } => {
                handlers::question_data::question_data_get(p, record)
            }
            Command::QuestionDataCreate { name, payload } => {
                handlers::question_data::question_data_create(p, name, payload)
            }
            Command::QuestionDataUpdate {
                record,
                name,
                payload,
                partial,
            } => handlers::question_data::question_data_update(p, record, name, payload, partial),
            Command::QuestionDataDelete { record } => {
                handlers::question_data::question_data_delete(p, record)
            }

            Command::RecordTypeList => handlers::record_type::record_type_list(p),
            Command::RecordTypeGet { record_type } => {
                handlers::record_type::record_type_get(p, record_type)
            }
            Command::RecordTypeDefine {
                record_type,
                fields,
            } => handlers::record_type::record_type_define(p, record_type, fields),
        }
    }
}
