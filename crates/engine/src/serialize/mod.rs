//! Serialization core
//!
//! Maps between the stored record shapes and the API representation:
//!
//! - [`control`]: survey `control` mapping ↔ Control-type records
//! - [`reshape`]: flat API fields ↔ nested data blobs
//! - [`survey`], [`data`]: per-resource serializers built on the two above
//! - [`routes`], [`context`]: link construction and request parameters

pub mod context;
pub mod control;
pub mod data;
pub mod reshape;
pub mod routes;
pub mod survey;

pub use context::{RequestContext, NAME_PARAM, SURVEY_PARAM};
pub use control::{ControlMap, ControlProjection, ControlUpdate};
pub use data::{QuestionDataSerializer, SurveyDataSerializer};
pub use reshape::{FieldReshaper, ValidatedRecord};
pub use routes::{encode_name, ApiRoutes, Routes};
pub use survey::{SurveyInput, SurveySerializer};
