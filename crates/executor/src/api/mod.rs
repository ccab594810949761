//! Typed API over the executor.
//!
//! [`SurveyDb`] turns each [`Command`](crate::Command) into a method with
//! typed arguments and results. Nested resources are reached through handles:
//! [`SurveyDb::data`] for one survey's records, [`SurveyDb::questions`] and
//! [`SurveyDb::record_types`].

mod db;
mod questions;
mod record_types;
mod survey_data;
mod surveys;

use std::path::Path;

use survey_engine::Database;

use crate::convert::convert_result;
use crate::{Executor, Result};

pub use questions::Questions;
pub use record_types::RecordTypes;
pub use survey_data::SurveyData;

/// Survey database handle.
pub struct SurveyDb {
    executor: Executor,
}

impl SurveyDb {
    /// Open (or create) a directory-backed database.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let db = convert_result(Database::open(dir))?;
        Ok(Self::from_database(db))
    }

    /// Memory-only database with the default configuration.
    pub fn ephemeral() -> Result<Self> {
        let db = convert_result(Database::ephemeral())?;
        Ok(Self::from_database(db))
    }

    /// Wrap an already opened database.
    pub fn from_database(db: std::sync::Arc<Database>) -> Self {
        Self {
            executor: Executor::new(db),
        }
    }

    /// The executor, for sending raw commands.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Records of one survey.
    pub fn data(&self, survey: survey_core::SurveyId) -> SurveyData<'_> {
        SurveyData::new(&self.executor, survey)
    }

    /// Question data records.
    pub fn questions(&self) -> Questions<'_> {
        Questions::new(&self.executor)
    }

    /// Record type definitions.
    pub fn record_types(&self) -> RecordTypes<'_> {
        RecordTypes::new(&self.executor)
    }
}

fn unexpected(command: &str) -> crate::Error {
    crate::Error::Internal {
        reason: format!("Unexpected output for {}", command),
    }
}
