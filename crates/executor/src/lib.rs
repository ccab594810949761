//! Command execution layer for the survey database.
//!
//! Every API operation is a [`Command`]; [`Executor::execute`] runs it in one
//! transaction and returns an [`Output`] or an [`Error`] carrying a status
//! code. [`SurveyDb`] wraps the executor in typed methods.
//!
//! ```text
//! use survey_executor::SurveyDb;
//!
//! let db = SurveyDb::open("./data")?;
//! let survey = db.create_survey(json!({"name": "Barometer", "control": {...}}))?;
//! db.flush()?;
//! ```

mod api;
mod bridge;
mod command;
mod convert;
mod error;
mod executor;
mod handlers;
mod output;

pub use api::{Questions, RecordTypes, SurveyData, SurveyDb};
pub use command::Command;
pub use convert::convert_result;
pub use error::Error;
pub use executor::Executor;
pub use output::{DatabaseInfo, Output};

/// Result alias for executor operations.
pub type Result<T> = std::result::Result<T, Error>;
