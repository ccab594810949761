//! Survey data and question data reshaping.

use crate::test_utils::*;
use serde_json::json;
use surveydb::prelude::*;

#[test]
fn question_outbound_defaults_declared_fields() {
    let db = scenario_db();
    let out = db
        .questions()
        .create(
            Some("intro"),
            json!({"type": "Question", "data": {"Prompt": "What is X?"}}),
        )
        .unwrap();

    let id = record_id(&out);
    assert_eq!(out["type"], json!("Question"));
    assert_eq!(out["Prompt"], json!("What is X?"));
    assert_eq!(out["Type"], json!(""));
    assert_eq!(out["_url"], json!(format!("/api/question/{}/?name=intro", id)));

    let keys: Vec<&String> = out.keys().collect();
    assert_eq!(keys, vec!["type", "_id", "Prompt", "Type", "_url"]);
}

#[test]
fn question_name_is_percent_encoded() {
    let db = scenario_db();
    let out = db
        .questions()
        .create(Some("wave 1/intro"), json!({"type": "Question", "Prompt": "p"}))
        .unwrap();
    let id = record_id(&out);
    assert_eq!(
        out["_url"],
        json!(format!("/api/question/{}/?name=wave%201/intro", id))
    );
}

#[test]
fn question_list_filters_by_name() {
    let db = scenario_db();
    let questions = db.questions();
    questions.create(Some("a"), json!({"type": "Question"})).unwrap();
    questions.create(Some("b"), json!({"type": "Question"})).unwrap();
    assert_eq!(questions.list(Some("a"), None).unwrap().len(), 1);
    assert_eq!(questions.list(None, Some("Question")).unwrap().len(), 2);
}

#[test]
fn survey_data_folds_flat_fields_and_drops_undeclared() {
    let db = scenario_db();
    let survey = create_survey(&db, "Barometer");
    let out = db
        .data(survey)
        .create(json!({"type": "Answer", "Q1": "yes", "Q9": "ignored", "_id": 77}))
        .unwrap();

    let id = record_id(&out);
    assert_ne!(id, RecordId::new(77));
    assert_eq!(
        serde_json::Value::Object(out),
        json!({
            "type": "Answer",
            "_id": id,
            "Q1": "yes",
            "Q2": "",
            "_url": format!("/api/survey/{}/data/{}/", survey, id),
        })
    );
}

#[test]
fn survey_data_unknown_type_is_rejected() {
    let db = scenario_db();
    let survey = create_survey(&db, "Barometer");
    let err = db
        .data(survey)
        .create(json!({"type": "Nope", "Q1": "yes"}))
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert_eq!(err.to_string(), "type: Object with type=Nope does not exist.");
}

#[test]
fn survey_data_patch_merges_put_replaces() {
    let db = scenario_db();
    let survey = create_survey(&db, "Barometer");
    let data = db.data(survey);
    let id = record_id(&data.create(json!({"type": "Answer", "Q1": "a", "Q2": "b"})).unwrap());

    let patched = data.patch(id, json!({"Q2": "c"})).unwrap();
    assert_eq!(patched["Q1"], json!("a"));
    assert_eq!(patched["Q2"], json!("c"));

    let replaced = data.update(id, json!({"type": "Answer", "Q2": "d"})).unwrap();
    assert_eq!(replaced["Q1"], json!(""));
    assert_eq!(replaced["Q2"], json!("d"));
}

#[test]
fn survey_data_under_wrong_survey_is_not_found() {
    let db = scenario_db();
    let a = create_survey(&db, "A");
    let b = create_survey(&db, "B");
    let id = record_id(&db.data(a).create(json!({"type": "Answer"})).unwrap());

    let err = db.data(b).get(id).unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert!(matches!(err, Error::RecordNotFound { .. }));
    assert!(db.data(b).delete(id).is_err());
    assert!(db.data(a).get(id).is_ok());
}

#[test]
fn redefining_a_type_changes_the_output_schema() {
    let db = scenario_db();
    let survey = create_survey(&db, "Barometer");
    let id = record_id(&db.data(survey).create(json!({"type": "Answer", "Q1": "a", "Q3": "c"})).unwrap());

    db.record_types().define("Answer", ["Q3"]).unwrap();
    let out = db.data(survey).get(id).unwrap();
    assert_eq!(out["Q3"], json!("c"));
    assert!(out.get("Q1").is_none());
}
