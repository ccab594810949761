//! Snapshot flush and reopen.

use crate::test_utils::*;
use serde_json::json;
use surveydb::prelude::*;
use tempfile::TempDir;

#[test]
fn flushed_data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let (survey, question) = {
        let db = SurveyDb::open(dir.path()).unwrap();
        db.record_types().define("Question", ["Prompt", "Type"]).unwrap();
        let survey = create_survey(&db, "Barometer");
        let question = record_id(
            &db.questions()
                .create(Some("q 1"), json!({"type": "Question", "Prompt": "p"}))
                .unwrap(),
        );
        db.flush().unwrap();
        (survey, question)
    };

    let db = SurveyDb::open(dir.path()).unwrap();
    let out = db.get_survey(survey).unwrap();
    assert_eq!(out["control"], full_control());

    let q = db.questions().get(question).unwrap();
    assert_eq!(q["Prompt"], json!("p"));
    assert_eq!(q["_url"], json!(format!("/api/question/{}/?name=q%201", question)));

    let info = db.info().unwrap();
    assert!(info.durable);
    assert_eq!(info.surveys, 1);
}

#[test]
fn unflushed_writes_are_lost() {
    let dir = TempDir::new().unwrap();
    {
        let db = SurveyDb::open(dir.path()).unwrap();
        create_survey(&db, "Barometer");
    }
    let db = SurveyDb::open(dir.path()).unwrap();
    assert!(db.list_surveys().unwrap().is_empty());
}

#[test]
fn ids_continue_after_reopen() {
    let dir = TempDir::new().unwrap();
    let first = {
        let db = SurveyDb::open(dir.path()).unwrap();
        let id = create_survey(&db, "A");
        db.flush().unwrap();
        id
    };
    let db = SurveyDb::open(dir.path()).unwrap();
    let second = create_survey(&db, "B");
    assert!(second > first);
}
