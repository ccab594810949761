//! SurveyDB: survey data management backend.
//!
//! Surveys carry a flat `control` mapping that is stored as one typed record
//! per key; survey answers and question metadata are typed records whose
//! data blobs are reshaped into flat, per-type API objects.
//!
//! # Quick start
//!
//! ```text
//! use surveydb::prelude::*;
//! use serde_json::json;
//!
//! let db = SurveyDb::ephemeral()?;
//! let survey = db.create_survey(json!({
//!     "name": "Barometer",
//!     "control": {"Coordinator Email": "a@x.com", "Researcher": "Bob", "Status": "Active"},
//! }))?;
//! ```
//!
//! # Crates
//!
//! | Crate | Contents |
//! |-------|----------|
//! | `survey-core` | ids, record shapes, JSON helpers, `SurveyError` |
//! | `survey-storage` | row tables, id allocation, snapshot image |
//! | `survey-concurrency` | buffered transactions |
//! | `survey-engine` | database handle, config, serializers, stores |
//! | `survey-executor` | command model, handlers, typed facade |

pub mod types;

pub use survey_core::{SurveyError, SurveyResult};
pub use survey_engine::Database;
pub use survey_executor::{Error, Executor, Result, SurveyDb};

/// Everything needed for typical use.
pub mod prelude {
    pub use crate::types::*;
    pub use crate::{Error, Result, SurveyDb};
}
