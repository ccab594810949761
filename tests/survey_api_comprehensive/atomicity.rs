//! Transactional boundaries and cascades.

use crate::test_utils::*;
use serde_json::json;
use surveydb::prelude::*;

#[test]
fn failed_create_leaves_no_survey_and_no_records() {
    let db = scenario_db();
    let before = db.info().unwrap().store_version;

    db.create_survey(json!({"name": "S", "control": {"Researcher": "Bob"}}))
        .unwrap_err();

    assert!(db.list_surveys().unwrap().is_empty());
    assert_eq!(db.info().unwrap().store_version, before);
}

#[test]
fn failed_create_does_not_reuse_ids() {
    let db = scenario_db();
    let first = create_survey(&db, "A");
    db.create_survey(json!({"name": "S", "control": {}}))
        .unwrap_err();
    let second = create_survey(&db, "B");
    assert!(second > first);
}

#[test]
fn invalid_update_changes_nothing() {
    let db = scenario_db();
    let id = create_survey(&db, "A");
    let before = db.get_survey(id).unwrap();

    let err = db
        .patch_survey(id, json!({"name": "", "control": {"Status": ""}}))
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert_eq!(db.get_survey(id).unwrap(), before);
}

#[test]
fn delete_cascades_to_owned_records_only() {
    let db = scenario_db();
    let a = create_survey(&db, "A");
    let b = create_survey(&db, "B");
    db.data(a).create(json!({"type": "Answer", "Q1": "x"})).unwrap();

    // Three control records plus one answer
    assert_eq!(db.delete_survey(a).unwrap(), 4);

    assert!(matches!(db.get_survey(a).unwrap_err(), Error::SurveyNotFound { .. }));
    assert_eq!(db.data(b).list(None).unwrap().len(), 3);
    assert_eq!(db.data(a).list(None).unwrap_err().status_code(), 404);
}

#[test]
fn raw_commands_round_trip_through_json() {
    let db = scenario_db();
    let cmd: Command = serde_json::from_value(json!({
        "command": "SurveyCreate",
        "payload": {"name": "S", "control": full_control()},
    }))
    .unwrap();
    let out = db.executor().execute(cmd).unwrap();
    let body = out.body();
    assert_eq!(body["name"], json!("S"));
    assert_eq!(body["control"], full_control());
}
