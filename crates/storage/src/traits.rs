//! Storage trait
//!
//! The persistence contract the transaction layer builds on. Implementations
//! must make [`Storage::apply`] atomic: readers observe either none or all of
//! a batch.

use crate::row::{Key, Row};
use survey_core::{RecordKind, SurveyResult};

/// One buffered write: `Some(row)` stores, `None` deletes
pub type Write = (Key, Option<Row>);

/// Row storage backing the record store
pub trait Storage: Send + Sync {
    /// Read one row
    fn get(&self, key: &Key) -> Option<Row>;

    /// All rows of one kind, in key order
    fn scan(&self, kind: RecordKind) -> Vec<(Key, Row)>;

    /// Apply a batch of writes atomically, returning the new store version
    fn apply(&self, writes: Vec<Write>) -> SurveyResult<u64>;

    /// Allocate a fresh id for a row of `kind`
    ///
    /// Ids are never reused, even if the allocating transaction aborts.
    fn allocate_id(&self, kind: RecordKind) -> u64;

    /// Current store version (number of committed batches)
    fn version(&self) -> u64;
}
