//! Shared fixtures.

use serde_json::{json, Value};
use surveydb::prelude::*;
use surveydb::Database;

/// Configuration used by the scenario tests
pub fn scenario_config() -> SurveyConfig {
    SurveyConfig {
        record_types: vec![
            RecordType::new(
                "Control",
                ["Coordinator Email", "Researcher", "Status", "Notes"],
            ),
            RecordType::new("Question", ["Prompt", "Type"]),
            RecordType::new("Answer", ["Q1", "Q2"]),
        ],
        ..SurveyConfig::default()
    }
}

/// Ephemeral database seeded with the scenario record types
pub fn scenario_db() -> SurveyDb {
    let db = Database::ephemeral_with_config(scenario_config()).unwrap();
    SurveyDb::from_database(db)
}

/// Ephemeral database with links rooted at `base`
pub fn scenario_db_with_base(base: &str) -> SurveyDb {
    let config = SurveyConfig {
        base_url: base.to_string(),
        ..scenario_config()
    };
    SurveyDb::from_database(Database::ephemeral_with_config(config).unwrap())
}

/// A control mapping with every mandatory key set
pub fn full_control() -> Value {
    json!({
        "Coordinator Email": "a@x.com",
        "Researcher": "Bob",
        "Status": "Active",
    })
}

/// Create a survey with a full control mapping and return its id
pub fn create_survey(db: &SurveyDb, name: &str) -> SurveyId {
    let out = db
        .create_survey(json!({"name": name, "control": full_control()}))
        .unwrap();
    survey_id(&out)
}

pub fn survey_id(out: &JsonMap) -> SurveyId {
    SurveyId::new(out["id"].as_u64().unwrap())
}

pub fn record_id(out: &JsonMap) -> RecordId {
    RecordId::new(out["_id"].as_u64().unwrap())
}
