//! Record type registry
//!
//! Resolves record types by name once per operation. Serializers consult the
//! registry instead of reading record type rows per record, so a list of N
//! records costs one type scan.

use crate::records::RecordAccess;
use rustc_hash::FxHashMap;
use survey_concurrency::TransactionContext;
use survey_core::{RecordType, SurveyError, SurveyResult};

/// Snapshot of every registered record type, keyed by name
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: FxHashMap<String, RecordType>,
}

impl TypeRegistry {
    /// Load every record type visible to `txn`
    pub fn load(txn: &TransactionContext) -> SurveyResult<Self> {
        let types = txn
            .record_types()?
            .into_iter()
            .map(|t| (t.name.clone(), t))
            .collect();
        Ok(Self { types })
    }

    /// Build from an explicit list (tests and tools)
    pub fn from_types(types: impl IntoIterator<Item = RecordType>) -> Self {
        Self {
            types: types.into_iter().map(|t| (t.name.clone(), t)).collect(),
        }
    }

    /// Resolve a type by name, failing with RecordTypeNotFound
    pub fn resolve(&self, name: &str) -> SurveyResult<&RecordType> {
        self.types
            .get(name)
            .ok_or_else(|| SurveyError::record_type_not_found(name))
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True when no types are registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
