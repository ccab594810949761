//! Survey control mapping scenarios.

use crate::test_utils::*;
use serde_json::json;
use surveydb::prelude::*;

#[test]
fn create_drops_falsy_and_projects_control() {
    let db = scenario_db();
    let out = db
        .create_survey(json!({
            "name": "Barometer",
            "control": {
                "Coordinator Email": "a@x.com",
                "Researcher": "Bob",
                "Status": "Active",
                "Notes": "",
            }
        }))
        .unwrap();

    assert_eq!(
        out["control"],
        json!({"Coordinator Email": "a@x.com", "Researcher": "Bob", "Status": "Active"})
    );

    // One stored record per truthy key
    let id = survey_id(&out);
    let stored = db.data(id).list(Some("Control")).unwrap();
    assert_eq!(stored.len(), 3);
}

#[test]
fn create_missing_status_names_it() {
    let db = scenario_db();
    let err = db
        .create_survey(json!({
            "name": "Barometer",
            "control": {"Coordinator Email": "a@x.com", "Researcher": "Bob"}
        }))
        .unwrap_err();

    assert_eq!(err.status_code(), 400);
    assert_eq!(err.to_string(), "Need fields Status");
    match err {
        Error::Validation { missing, .. } => assert_eq!(missing, vec!["Status"]),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn create_with_empty_control_names_every_mandatory_key() {
    let db = scenario_db();
    let err = db
        .create_survey(json!({"name": "Barometer", "control": {"Status": 0}}))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Need fields Coordinator Email, Researcher, Status"
    );
}

#[test]
fn update_deletes_replaces_and_keeps_the_rest() {
    let db = scenario_db();
    let id = create_survey(&db, "Barometer");

    let out = db
        .patch_survey(
            id,
            json!({"control": {"Status": "", "Researcher": "Carol"}}),
        )
        .unwrap();

    assert_eq!(
        out["control"],
        json!({"Coordinator Email": "a@x.com", "Researcher": "Carol"})
    );
    let stored = db.data(id).list(Some("Control")).unwrap();
    assert_eq!(stored.len(), 2);
}

#[test]
fn update_of_absent_key_with_falsy_value_is_noop() {
    let db = scenario_db();
    let id = create_survey(&db, "Barometer");
    let before = db.get_survey(id).unwrap();

    let after = db
        .patch_survey(id, json!({"control": {"Notes": null, "Deadline": false}}))
        .unwrap();
    assert_eq!(before["control"], after["control"]);
}

#[test]
fn update_may_drop_mandatory_keys() {
    // Mandatory keys are only enforced at creation time
    let db = scenario_db();
    let id = create_survey(&db, "Barometer");
    let out = db
        .patch_survey(id, json!({"control": {"Researcher": ""}}))
        .unwrap();
    assert!(out["control"].get("Researcher").is_none());
}

#[test]
fn full_update_changes_name_and_control() {
    let db = scenario_db();
    let id = create_survey(&db, "Barometer");
    let out = db
        .update_survey(
            id,
            json!({"name": "Barometer 2", "description": "second wave", "control": {"Notes": "n"}}),
        )
        .unwrap();
    assert_eq!(out["name"], json!("Barometer 2"));
    assert_eq!(out["description"], json!("second wave"));
    assert_eq!(out["control"]["Notes"], json!("n"));
    assert_eq!(out["control"]["Status"], json!("Active"));
}

#[test]
fn survey_links_use_configured_base() {
    let db = scenario_db_with_base("https://odb.example.org/");
    let id = create_survey(&db, "Barometer");
    let out = db.get_survey(id).unwrap();
    assert_eq!(
        out["_url"],
        json!(format!("https://odb.example.org/api/survey/{}/", id))
    );
    assert_eq!(
        out["_data_url"],
        json!(format!("https://odb.example.org/api/survey/{}/data/", id))
    );
}

#[test]
fn control_values_keep_their_json_type() {
    let db = scenario_db();
    let out = db
        .create_survey(json!({
            "name": "Barometer",
            "control": {
                "Coordinator Email": "a@x.com",
                "Researcher": "Bob",
                "Status": "Active",
                "Wave": 3,
                "Regions": ["north", "south"],
            }
        }))
        .unwrap();
    assert_eq!(out["control"]["Wave"], json!(3));
    assert_eq!(out["control"]["Regions"], json!(["north", "south"]));
}
