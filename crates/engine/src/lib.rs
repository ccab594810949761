//! Survey engine
//!
//! Database handle, configuration, record type registry, typed record access
//! and the serialization core that maps stored records to API shapes.

pub mod config;
pub mod database;
pub mod records;
pub mod registry;
pub mod serialize;
pub mod store;

pub use config::{SurveyConfig, CONFIG_FILE, CONTROL, MANDATORY_CONTROL_FIELDS};
pub use database::{Database, SNAPSHOT_FILE};
pub use records::RecordAccess;
pub use registry::TypeRegistry;
pub use serialize::{
    encode_name, ApiRoutes, ControlMap, ControlProjection, ControlUpdate, FieldReshaper,
    QuestionDataSerializer, RequestContext, Routes, SurveyDataSerializer, SurveyInput,
    SurveySerializer, ValidatedRecord,
};
pub use store::{QuestionStore, RecordTypeStore, SurveyDataStore, SurveyStore};
