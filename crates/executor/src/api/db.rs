//! Database operations: ping, info, flush, configuration.

use super::{unexpected, SurveyDb};
use crate::output::DatabaseInfo;
use crate::{Command, Output, Result};
use survey_engine::SurveyConfig;

impl SurveyDb {
    /// Ping the database.
    pub fn ping(&self) -> Result<String> {
        match self.executor.execute(Command::Ping)? {
            Output::Pong { version } => Ok(version),
            _ => Err(unexpected("Ping")),
        }
    }

    /// Get database info.
    pub fn info(&self) -> Result<DatabaseInfo> {
        match self.executor.execute(Command::Info)? {
            Output::DatabaseInfo(info) => Ok(info),
            _ => Err(unexpected("Info")),
        }
    }

    /// Write the snapshot to disk.
    pub fn flush(&self) -> Result<()> {
        match self.executor.execute(Command::Flush)? {
            Output::Unit => Ok(()),
            _ => Err(unexpected("Flush")),
        }
    }

    /// Get the current database configuration.
    pub fn config(&self) -> Result<SurveyConfig> {
        match self.executor.execute(Command::ConfigGet)? {
            Output::Config(cfg) => Ok(cfg),
            _ => Err(unexpected("ConfigGet")),
        }
    }
}
