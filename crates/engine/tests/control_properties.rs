//! Property tests for the survey control mapping

use proptest::prelude::*;
use serde_json::{json, Value};
use survey_core::{is_truthy, JsonMap, SurveyId};
use survey_engine::{Database, SurveyStore, MANDATORY_CONTROL_FIELDS};

const KEYS: [&str; 6] = ["Coordinator Email", "Researcher", "Status", "Notes", "Deadline", "Wave"];

fn control_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(json!("")),
        Just(json!(0)),
        Just(json!(false)),
        "[a-z]{1,8}".prop_map(Value::from),
        (1i64..100).prop_map(Value::from),
    ]
}

fn control_map() -> impl Strategy<Value = JsonMap> {
    proptest::collection::btree_map(proptest::sample::select(KEYS.to_vec()), control_value(), 0..=KEYS.len())
        .prop_map(|m| m.into_iter().map(|(k, v)| (k.to_string(), v)).collect::<JsonMap>())
}

fn truthy_only(map: &JsonMap) -> JsonMap {
    map.iter()
        .filter(|(_, v)| is_truthy(v))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn as_object(value: &Value) -> JsonMap {
    value.as_object().cloned().unwrap_or_default()
}

fn full_control() -> JsonMap {
    MANDATORY_CONTROL_FIELDS
        .iter()
        .map(|k| (k.to_string(), json!("set")))
        .collect()
}

proptest! {
    #[test]
    fn create_succeeds_iff_mandatory_keys_present(control in control_map()) {
        let store = SurveyStore::new(Database::ephemeral().unwrap());
        let truthy = truthy_only(&control);
        let missing: Vec<&str> = MANDATORY_CONTROL_FIELDS
            .iter()
            .copied()
            .filter(|k| !truthy.contains_key(*k))
            .collect();

        let result = store.create(json!({"name": "S", "control": Value::Object(control)}));
        if missing.is_empty() {
            let out = result.unwrap();
            prop_assert_eq!(as_object(&out["control"]), truthy);
        } else {
            let err = result.unwrap_err();
            prop_assert_eq!(err.to_string(), format!("Need fields {}", missing.join(", ")));
            prop_assert!(store.list().unwrap().is_empty());
        }
    }

    #[test]
    fn update_touches_only_mentioned_keys(update in control_map()) {
        let store = SurveyStore::new(Database::ephemeral().unwrap());
        let mut initial = full_control();
        initial.insert("Notes".into(), json!("keep"));
        let created = store
            .create(json!({"name": "S", "control": Value::Object(initial.clone())}))
            .unwrap();
        let id = SurveyId::new(created["id"].as_u64().unwrap());

        let out = store
            .update(id, json!({"control": Value::Object(update.clone())}), true)
            .unwrap();
        let control = as_object(&out["control"]);

        let mut expected = initial;
        for (k, v) in &update {
            if is_truthy(v) {
                expected.insert(k.clone(), v.clone());
            } else {
                expected.remove(k);
            }
        }
        prop_assert_eq!(control, expected);
    }

    #[test]
    fn update_is_idempotent(update in control_map()) {
        let store = SurveyStore::new(Database::ephemeral().unwrap());
        let created = store
            .create(json!({"name": "S", "control": Value::Object(full_control())}))
            .unwrap();
        let id = SurveyId::new(created["id"].as_u64().unwrap());
        let patch = json!({"control": Value::Object(update)});

        let first = store.update(id, patch.clone(), true).unwrap();
        let second = store.update(id, patch, true).unwrap();
        prop_assert_eq!(&first["control"], &second["control"]);
    }
}
