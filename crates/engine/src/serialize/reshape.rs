//! Field reshaping between stored blobs and API objects
//!
//! Inbound, clients may post flat `field: value` pairs; [`FieldReshaper::fold`]
//! moves them into a `data` object unless the payload already carries one.
//! Outbound, [`FieldReshaper::expand`] flattens a blob back out using the
//! record type's declared field list as the schema: every declared field is
//! emitted (empty string when unset) and undeclared keys are dropped.

use crate::config::SurveyConfig;
use crate::registry::TypeRegistry;
use survey_core::{DataBlob, JsonMap, RecordId, RecordType, SurveyError, SurveyResult};

/// Key of the explicit data wrapper in payloads
pub const DATA_KEY: &str = "data";
/// Key naming the record type in payloads and representations
pub const TYPE_KEY: &str = "type";
/// Key of the record id in representations
pub const ID_KEY: &str = "_id";
/// Key of the computed detail link in representations
pub const URL_KEY: &str = "_url";

/// Inbound payload after folding and structured validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord {
    /// Resolved record type, if the payload named one
    pub record_type: Option<RecordType>,
    /// Folded data blob
    pub data: DataBlob,
}

/// Bidirectional blob ↔ API reshaping
#[derive(Debug, Clone, Copy)]
pub struct FieldReshaper<'a> {
    reserved_prefix: &'a str,
    private_fields: &'a [String],
}

impl<'a> FieldReshaper<'a> {
    /// Reshaper with an explicit reserved prefix and private-field set
    pub fn new(reserved_prefix: &'a str, private_fields: &'a [String]) -> Self {
        Self {
            reserved_prefix,
            private_fields,
        }
    }

    /// Reshaper configured from the database configuration
    pub fn from_config(config: &'a SurveyConfig) -> Self {
        Self::new(&config.reserved_prefix, &config.private_fields)
    }

    fn stays_top_level(&self, key: &str) -> bool {
        key.starts_with(self.reserved_prefix) || self.private_fields.iter().any(|f| f == key)
    }

    // =========================================================================
    // Inbound
    // =========================================================================

    /// Fold flat fields into a `data` object.
    ///
    /// A payload that already has `data` is returned unchanged. Otherwise every
    /// top-level key that is neither reserved-prefixed nor private moves into a
    /// new `data` object, keeping payload order.
    pub fn fold(&self, payload: JsonMap) -> JsonMap {
        if payload.contains_key(DATA_KEY) {
            return payload;
        }
        let mut top = JsonMap::new();
        let mut data = JsonMap::new();
        for (key, value) in payload {
            if self.stays_top_level(&key) {
                top.insert(key, value);
            } else {
                data.insert(key, value);
            }
        }
        top.insert(DATA_KEY.to_string(), serde_json::Value::Object(data));
        top
    }

    /// Fold, then validate `type` and `data`.
    ///
    /// `type` is required unless `partial`; when present it must name a
    /// registered record type. `data` must be an object.
    pub fn to_internal(
        &self,
        payload: serde_json::Value,
        registry: &TypeRegistry,
        partial: bool,
    ) -> SurveyResult<ValidatedRecord> {
        let payload = match payload {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(SurveyError::validation(format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    json_type_name(&other)
                )))
            }
        };
        let mut folded = self.fold(payload);

        let record_type = match folded.remove(TYPE_KEY) {
            None | Some(serde_json::Value::Null) if partial => None,
            None | Some(serde_json::Value::Null) => {
                return Err(SurveyError::invalid_field(TYPE_KEY, "This field is required."))
            }
            Some(serde_json::Value::String(name)) => match registry.resolve(&name) {
                Ok(rt) => Some(rt.clone()),
                Err(_) => {
                    return Err(SurveyError::invalid_field(
                        TYPE_KEY,
                        format!("Object with type={} does not exist.", name),
                    ))
                }
            },
            Some(other) => {
                return Err(SurveyError::invalid_field(
                    TYPE_KEY,
                    format!("Invalid value: expected a type name, got {}.", json_type_name(&other)),
                ))
            }
        };

        let data = match folded.remove(DATA_KEY) {
            Some(serde_json::Value::Object(map)) => DataBlob::from_map(map),
            Some(other) => {
                return Err(SurveyError::invalid_field(
                    DATA_KEY,
                    format!("Expected a dictionary of items but got {}.", json_type_name(&other)),
                ))
            }
            None => DataBlob::new(),
        };

        Ok(ValidatedRecord { record_type, data })
    }

    // =========================================================================
    // Outbound
    // =========================================================================

    /// Flatten a stored blob into its API shape.
    ///
    /// Output order: `type`, `_id`, the declared fields in declaration order.
    /// Callers append `_url`.
    pub fn expand(&self, record_type: &RecordType, id: RecordId, blob: &DataBlob) -> JsonMap {
        let mut out = JsonMap::new();
        out.insert(
            TYPE_KEY.to_string(),
            serde_json::Value::String(record_type.name.clone()),
        );
        out.insert(ID_KEY.to_string(), serde_json::Value::from(id.as_u64()));
        for field in &record_type.fields {
            out.insert(field.clone(), blob.get_or_empty(field));
        }
        out
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "str",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "dict",
    }
}
