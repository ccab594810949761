//! Transaction context
//!
//! A [`TransactionContext`] buffers every write of one logical operation in a
//! private write set. Reads inside the transaction see the transaction's own
//! writes layered over committed storage; nothing is visible to other readers
//! until the [`TransactionManager`](crate::TransactionManager) commits it.
//!
//! Key rules:
//! - Last write to a key inside a transaction wins
//! - Delete of an absent key is a no-op at commit
//! - Dropping a context without committing discards the write set (rollback)
//! - No read-set validation: concurrent commits are last-writer-wins per key

use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::sync::Arc;
use survey_core::RecordKind;
use survey_storage::{Key, Row, Storage, Write};

/// Transaction lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Accepting reads and writes
    Active,
    /// Write set applied to storage
    Committed,
    /// Write set discarded
    Aborted,
}

/// Buffered, isolated view over storage for one logical operation
pub struct TransactionContext {
    /// Transaction id (monotonic per manager)
    pub txn_id: u64,
    storage: Arc<dyn Storage>,
    /// Buffered writes: `Some(row)` = put, `None` = delete
    write_set: FxHashMap<Key, Option<Row>>,
    status: TransactionStatus,
}

impl TransactionContext {
    /// Start a transaction over `storage`
    pub fn new(txn_id: u64, storage: Arc<dyn Storage>) -> Self {
        Self {
            txn_id,
            storage,
            write_set: FxHashMap::default(),
            status: TransactionStatus::Active,
        }
    }

    /// Current status
    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    /// True if nothing has been written
    pub fn is_read_only(&self) -> bool {
        self.write_set.is_empty()
    }

    /// Number of buffered writes
    pub fn pending_writes(&self) -> usize {
        self.write_set.len()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Read one row, seeing this transaction's own writes first
    pub fn get(&self, key: &Key) -> Option<Row> {
        match self.write_set.get(key) {
            Some(buffered) => buffered.clone(),
            None => self.storage.get(key),
        }
    }

    /// All rows of one kind, in key order, with buffered writes applied
    pub fn scan(&self, kind: RecordKind) -> Vec<(Key, Row)> {
        let mut merged: BTreeMap<Key, Row> = self.storage.scan(kind).into_iter().collect();
        for (key, buffered) in &self.write_set {
            if key.kind() != kind {
                continue;
            }
            match buffered {
                Some(row) => {
                    merged.insert(key.clone(), row.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }
        merged.into_iter().collect()
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Buffer a put of `row` under its own key
    pub fn put(&mut self, row: Row) {
        self.write_set.insert(row.key(), Some(row));
    }

    /// Buffer a delete of `key`
    pub fn delete(&mut self, key: Key) {
        self.write_set.insert(key, None);
    }

    /// Allocate a fresh id for a new row of `kind`
    pub fn allocate_id(&self, kind: RecordKind) -> u64 {
        self.storage.allocate_id(kind)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Drain the write set in key order, marking the transaction committed
    pub(crate) fn take_writes(&mut self) -> Vec<Write> {
        self.status = TransactionStatus::Committed;
        let mut writes: Vec<Write> = self.write_set.drain().collect();
        writes.sort_by(|a, b| a.0.cmp(&b.0));
        writes
    }

    /// Discard the write set
    pub fn abort(&mut self) {
        self.write_set.clear();
        self.status = TransactionStatus::Aborted;
    }
}

impl std::fmt::Debug for TransactionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionContext")
            .field("txn_id", &self.txn_id)
            .field("status", &self.status)
            .field("pending_writes", &self.write_set.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_core::{DataBlob, RecordId, Survey, SurveyId, TypedRecord};
    use survey_storage::MemoryStorage;

    fn setup() -> (Arc<MemoryStorage>, TransactionContext) {
        let storage = Arc::new(MemoryStorage::new());
        let ctx = TransactionContext::new(1, storage.clone());
        (storage, ctx)
    }

    fn data_row(id: u64) -> Row {
        Row::SurveyData(TypedRecord {
            id: RecordId::new(id),
            survey: SurveyId::new(1),
            record_type: "Control".into(),
            data: DataBlob::new(),
        })
    }

    #[test]
    fn test_reads_see_own_writes() {
        let (storage, mut ctx) = setup();
        let row = Row::Survey(Survey::new(SurveyId::new(1), "s", ""));
        ctx.put(row.clone());

        assert_eq!(ctx.get(&row.key()), Some(row.clone()));
        // Not visible outside the transaction
        assert!(storage.get(&row.key()).is_none());
    }

    #[test]
    fn test_buffered_delete_hides_committed_row() {
        let (storage, mut ctx) = setup();
        let row = data_row(1);
        storage.apply(vec![(row.key(), Some(row.clone()))]).unwrap();

        ctx.delete(row.key());
        assert!(ctx.get(&row.key()).is_none());
        assert!(ctx.scan(RecordKind::SurveyData).is_empty());
        assert!(storage.get(&row.key()).is_some());
    }

    #[test]
    fn test_scan_merges_write_set() {
        let (storage, mut ctx) = setup();
        let committed = data_row(2);
        storage
            .apply(vec![(committed.key(), Some(committed))])
            .unwrap();

        ctx.put(data_row(1));
        ctx.put(data_row(3));
        ctx.put(Row::Survey(Survey::new(SurveyId::new(1), "s", "")));

        let keys: Vec<Key> = ctx
            .scan(RecordKind::SurveyData)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(
            keys,
            vec![
                Key::SurveyData(RecordId::new(1)),
                Key::SurveyData(RecordId::new(2)),
                Key::SurveyData(RecordId::new(3)),
            ]
        );
    }

    #[test]
    fn test_last_write_wins_within_transaction() {
        let (_storage, mut ctx) = setup();
        ctx.put(data_row(1));
        ctx.delete(Key::SurveyData(RecordId::new(1)));
        assert_eq!(ctx.pending_writes(), 1);
        assert!(ctx.get(&Key::SurveyData(RecordId::new(1))).is_none());
    }

    #[test]
    fn test_abort_discards_writes() {
        let (_storage, mut ctx) = setup();
        ctx.put(data_row(1));
        ctx.abort();
        assert!(ctx.is_read_only());
        assert_eq!(ctx.status(), TransactionStatus::Aborted);
    }
}
