//! Control map projection
//!
//! A survey's `control` mapping is exposed as one flat object but stored as
//! one Control-type record per key, each with the blob
//! `{"field": <key>, "value": <value>}`.
//!
//! - read: collect `field → value` over the survey's Control records
//! - create: drop falsy values, require the mandatory keys, one record per key
//! - update: falsy deletes, truthy replaces in place or creates; keys not
//!   mentioned are left alone

use crate::records::RecordAccess;
use std::collections::BTreeMap;
use survey_concurrency::TransactionContext;
use survey_core::{is_truthy, DataBlob, JsonMap, SurveyError, SurveyId, SurveyResult, TypedRecord};

/// Flat control mapping, ordered by key
pub type ControlMap = BTreeMap<String, serde_json::Value>;

const FIELD_KEY: &str = "field";
const VALUE_KEY: &str = "value";

/// What an update did to the stored control records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlUpdate {
    /// Keys that got a new record
    pub created: Vec<String>,
    /// Keys whose stored value was replaced
    pub replaced: Vec<String>,
    /// Keys whose record was deleted
    pub deleted: Vec<String>,
}

impl ControlUpdate {
    /// True when nothing was written
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.replaced.is_empty() && self.deleted.is_empty()
    }
}

/// Projection between a control mapping and Control-type records
#[derive(Debug, Clone, Copy)]
pub struct ControlProjection<'a> {
    control_type: &'a str,
    mandatory: &'a [String],
}

impl<'a> ControlProjection<'a> {
    /// Projection storing records of `control_type`, requiring `mandatory` keys on create
    pub fn new(control_type: &'a str, mandatory: &'a [String]) -> Self {
        Self {
            control_type,
            mandatory,
        }
    }

    /// Ensure the Control record type exists; fatal lookup failure otherwise
    pub fn require_type(&self, txn: &TransactionContext) -> SurveyResult<()> {
        txn.record_type(self.control_type).map(|_| ())
    }

    // =========================================================================
    // Read
    // =========================================================================

    /// Reconstruct the control mapping of `survey`
    pub fn project_out(&self, txn: &TransactionContext, survey: SurveyId) -> SurveyResult<ControlMap> {
        let mut control = ControlMap::new();
        for record in txn.filter_survey_data(survey, Some(self.control_type))? {
            if let Some(field) = record.data.get_str(FIELD_KEY) {
                let value = record
                    .data
                    .get(VALUE_KEY)
                    .cloned()
                    .unwrap_or(serde_json::Value::Null);
                control.insert(field.to_string(), value);
            }
        }
        Ok(control)
    }

    // =========================================================================
    // Create
    // =========================================================================

    /// Drop falsy entries and check the mandatory keys are present.
    ///
    /// Pure: touches no storage, so callers validate before writing anything.
    pub fn prepare_create(&self, candidate: JsonMap) -> SurveyResult<Vec<(String, serde_json::Value)>> {
        let entries: Vec<(String, serde_json::Value)> = candidate
            .into_iter()
            .filter(|(_, v)| is_truthy(v))
            .collect();

        let missing: Vec<String> = self
            .mandatory
            .iter()
            .filter(|m| !entries.iter().any(|(k, _)| k == *m))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(SurveyError::missing_fields(missing));
        }
        Ok(entries)
    }

    /// Stage one Control record per prepared entry
    pub fn write_create(
        &self,
        txn: &mut TransactionContext,
        survey: SurveyId,
        entries: Vec<(String, serde_json::Value)>,
    ) -> SurveyResult<usize> {
        self.require_type(txn)?;
        let count = entries.len();
        for (key, value) in entries {
            txn.insert_survey_data(survey, self.control_type, DataBlob::control_pair(key, value));
        }
        tracing::debug!(target: "surveydb::control", survey_id = %survey, count, "Created control records");
        Ok(count)
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Apply a partial control update to `survey`
    pub fn apply_update(
        &self,
        txn: &mut TransactionContext,
        survey: SurveyId,
        incoming: JsonMap,
    ) -> SurveyResult<ControlUpdate> {
        self.require_type(txn)?;

        let mut current: BTreeMap<String, Vec<TypedRecord>> = BTreeMap::new();
        for record in txn.filter_survey_data(survey, Some(self.control_type))? {
            if let Some(field) = record.data.get_str(FIELD_KEY) {
                current.entry(field.to_string()).or_default().push(record);
            }
        }

        let mut outcome = ControlUpdate::default();
        for (key, value) in incoming {
            // Duplicates for one key collapse: falsy drops them all, truthy keeps the oldest.
            let mut existing = current.remove(&key).unwrap_or_default().into_iter();
            if !is_truthy(&value) {
                let mut deleted = false;
                for record in existing {
                    txn.delete_survey_data(record.id);
                    deleted = true;
                }
                if deleted {
                    outcome.deleted.push(key);
                }
                continue;
            }
            match existing.next() {
                Some(mut record) => {
                    for extra in existing {
                        txn.delete_survey_data(extra.id);
                    }
                    record.data.insert(VALUE_KEY.to_string(), value);
                    txn.save_survey_data(record);
                    outcome.replaced.push(key);
                }
                None => {
                    txn.insert_survey_data(
                        survey,
                        self.control_type,
                        DataBlob::control_pair(key.clone(), value),
                    );
                    outcome.created.push(key);
                }
            }
        }

        tracing::debug!(
            target: "surveydb::control",
            survey_id = %survey,
            created = outcome.created.len(),
            replaced = outcome.replaced.len(),
            deleted = outcome.deleted.len(),
            "Updated control records"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use serde_json::json;
    use std::sync::Arc;

    fn mandatory() -> Vec<String> {
        vec!["Coordinator Email".into(), "Researcher".into(), "Status".into()]
    }

    fn obj(v: serde_json::Value) -> JsonMap {
        match v {
            serde_json::Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    fn setup() -> (Arc<Database>, SurveyId) {
        let db = Database::ephemeral().unwrap();
        let id = db
            .transaction(|txn| Ok(txn.insert_survey("S".into(), String::new()).id))
            .unwrap();
        (db, id)
    }

    #[test]
    fn test_prepare_create_drops_falsy_values() {
        let m = mandatory();
        let projection = ControlProjection::new("Control", &m);
        let entries = projection
            .prepare_create(obj(json!({
                "Coordinator Email": "a@x.com",
                "Researcher": "Bob",
                "Status": "Active",
                "Notes": "",
                "Flag": false,
                "Count": 0,
            })))
            .unwrap();
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Coordinator Email", "Researcher", "Status"]);
    }

    #[test]
    fn test_prepare_create_names_missing_keys() {
        let m = mandatory();
        let projection = ControlProjection::new("Control", &m);
        let err = projection
            .prepare_create(obj(json!({"Coordinator Email": "a@x.com", "Researcher": ""})))
            .unwrap_err();
        assert_eq!(err.to_string(), "Need fields Researcher, Status");
    }

    #[test]
    fn test_create_then_project_out() {
        let (db, survey) = setup();
        let m = mandatory();
        let projection = ControlProjection::new("Control", &m);

        let control = db
            .transaction(|txn| {
                let entries = projection.prepare_create(obj(json!({
                    "Coordinator Email": "a@x.com",
                    "Researcher": "Bob",
                    "Status": "Active",
                    "Round": 2,
                })))?;
                projection.write_create(txn, survey, entries)?;
                projection.project_out(txn, survey)
            })
            .unwrap();

        assert_eq!(control.len(), 4);
        assert_eq!(control["Round"], json!(2));
        assert_eq!(control["Researcher"], json!("Bob"));
    }

    #[test]
    fn test_update_deletes_replaces_and_creates() {
        let (db, survey) = setup();
        let m = mandatory();
        let projection = ControlProjection::new("Control", &m);
        db.transaction(|txn| {
            projection.write_create(
                txn,
                survey,
                vec![
                    ("Status".into(), json!("Active")),
                    ("Researcher".into(), json!("Bob")),
                    ("Coordinator Email".into(), json!("a@x.com")),
                ],
            )
        })
        .unwrap();

        let outcome = db
            .transaction(|txn| {
                projection.apply_update(
                    txn,
                    survey,
                    obj(json!({"Status": "", "Researcher": "Carol", "Deadline": "May"})),
                )
            })
            .unwrap();
        assert_eq!(outcome.deleted, vec!["Status"]);
        assert_eq!(outcome.replaced, vec!["Researcher"]);
        assert_eq!(outcome.created, vec!["Deadline"]);

        let control = db.transaction(|txn| projection.project_out(txn, survey)).unwrap();
        assert!(!control.contains_key("Status"));
        assert_eq!(control["Researcher"], json!("Carol"));
        assert_eq!(control["Coordinator Email"], json!("a@x.com"));
        assert_eq!(control["Deadline"], json!("May"));
    }

    #[test]
    fn test_update_delete_of_absent_key_is_noop() {
        let (db, survey) = setup();
        let m = mandatory();
        let projection = ControlProjection::new("Control", &m);
        let version = db.version();
        let outcome = db
            .transaction(|txn| projection.apply_update(txn, survey, obj(json!({"Notes": null}))))
            .unwrap();
        assert!(outcome.is_empty());
        assert_eq!(db.version(), version);
    }

    #[test]
    fn test_control_scoped_to_survey() {
        let (db, a) = setup();
        let b = db
            .transaction(|txn| Ok(txn.insert_survey("B".into(), String::new()).id))
            .unwrap();
        let m = mandatory();
        let projection = ControlProjection::new("Control", &m);
        db.transaction(|txn| {
            projection.write_create(txn, a, vec![("Status".into(), json!("A"))])?;
            projection.write_create(txn, b, vec![("Status".into(), json!("B"))])
        })
        .unwrap();

        let control_b = db.transaction(|txn| projection.project_out(txn, b)).unwrap();
        assert_eq!(control_b["Status"], json!("B"));
        assert_eq!(control_b.len(), 1);
    }

    #[test]
    fn test_missing_control_type_is_fatal() {
        let (db, survey) = setup();
        let m = mandatory();
        let projection = ControlProjection::new("NoSuchType", &m);
        let err = db
            .transaction(|txn| projection.apply_update(txn, survey, JsonMap::new()))
            .unwrap_err();
        assert!(matches!(err, SurveyError::RecordTypeNotFound { .. }));
    }

    fn seed_duplicates(db: &Database, survey: SurveyId, field: &str, values: [&str; 2]) {
        for value in values {
            db.transaction(|txn| {
                txn.insert_survey_data(
                    survey,
                    "Control",
                    DataBlob::control_pair(field.to_string(), json!(value)),
                );
                Ok(())
            })
            .unwrap();
        }
    }

    #[test]
    fn test_falsy_update_removes_every_duplicate() {
        let (db, survey) = setup();
        let m = mandatory();
        let projection = ControlProjection::new("Control", &m);
        seed_duplicates(&db, survey, "Notes", ["one", "two"]);

        let outcome = db
            .transaction(|txn| projection.apply_update(txn, survey, obj(json!({"Notes": ""}))))
            .unwrap();
        assert_eq!(outcome.deleted, vec!["Notes"]);

        let control = db.transaction(|txn| projection.project_out(txn, survey)).unwrap();
        assert!(!control.contains_key("Notes"));
        let left = db
            .transaction(|txn| txn.filter_survey_data(survey, Some("Control")))
            .unwrap();
        assert!(left.is_empty());
    }

    #[test]
    fn test_truthy_update_collapses_duplicates() {
        let (db, survey) = setup();
        let m = mandatory();
        let projection = ControlProjection::new("Control", &m);
        seed_duplicates(&db, survey, "Notes", ["one", "two"]);

        db.transaction(|txn| projection.apply_update(txn, survey, obj(json!({"Notes": "three"}))))
            .unwrap();

        let left = db
            .transaction(|txn| txn.filter_survey_data(survey, Some("Control")))
            .unwrap();
        assert_eq!(left.len(), 1);
        let control = db.transaction(|txn| projection.project_out(txn, survey)).unwrap();
        assert_eq!(control["Notes"], json!("three"));
    }
}
