//! Resource stores
//!
//! Each store wraps an `Arc<Database>` and runs every operation in one
//! transaction, pairing the typed record access with the matching serializer.
//! Results are API-shaped JSON objects.
//!
//! [`SurveyStore`] is the survey/control orchestrator: a survey and its
//! Control records are created and updated together or not at all.

mod question;
mod record_type;
mod survey;
mod survey_data;

pub use question::QuestionStore;
pub use record_type::RecordTypeStore;
pub use survey::SurveyStore;
pub use survey_data::SurveyDataStore;
