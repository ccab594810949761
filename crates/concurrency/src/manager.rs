//! Transaction manager
//!
//! Hands out [`TransactionContext`]s and commits their write sets. Commits
//! are serialized by a mutex and applied through [`Storage::apply`], which is
//! atomic, so a committed write set becomes visible all at once.
//!
//! Under the commit lock, a write set is rejected when it would leave a survey
//! data row without its owning survey: either the row's survey is gone, or a
//! survey delete misses rows committed since the deleting transaction scanned.

use crate::transaction::{TransactionContext, TransactionStatus};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use survey_core::{RecordKind, SurveyError, SurveyId, SurveyResult};
use survey_storage::{Key, Row, Storage, Write};

/// Begins and commits transactions over one storage instance
pub struct TransactionManager {
    storage: Arc<dyn Storage>,
    commit_lock: Mutex<()>,
    next_txn_id: AtomicU64,
}

impl TransactionManager {
    /// Create a manager for `storage`
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            commit_lock: Mutex::new(()),
            next_txn_id: AtomicU64::new(1),
        }
    }

    /// Start a new transaction
    pub fn begin(&self) -> TransactionContext {
        let txn_id = self.next_txn_id.fetch_add(1, Ordering::AcqRel);
        TransactionContext::new(txn_id, Arc::clone(&self.storage))
    }

    /// Commit a transaction's write set
    ///
    /// Returns the new store version, or the current one for a read-only
    /// transaction (which writes nothing).
    pub fn commit(&self, ctx: &mut TransactionContext) -> SurveyResult<u64> {
        if ctx.status() != TransactionStatus::Active {
            return Err(SurveyError::aborted(format!(
                "transaction {} is not active ({:?})",
                ctx.txn_id,
                ctx.status()
            )));
        }
        if ctx.is_read_only() {
            ctx.take_writes();
            return Ok(self.storage.version());
        }

        let _guard = self.commit_lock.lock();
        let writes = ctx.take_writes();
        if let Err(e) = self.check_ownership(&writes) {
            tracing::warn!(
                target: "surveydb::txn",
                txn_id = ctx.txn_id,
                error = %e,
                "Rejected transaction at commit"
            );
            ctx.abort();
            return Err(e);
        }
        let count = writes.len();
        let version = self.storage.apply(writes)?;
        tracing::debug!(
            target: "surveydb::txn",
            txn_id = ctx.txn_id,
            version,
            writes = count,
            "Committed transaction"
        );
        Ok(version)
    }

    /// Survey data must land under a live survey; a survey delete must cover
    /// every committed row it owns. Called with the commit lock held.
    fn check_ownership(&self, writes: &[Write]) -> SurveyResult<()> {
        let buffered = |key: &Key| writes.iter().find(|(k, _)| k == key).map(|(_, row)| row);

        for (_, row) in writes {
            if let Some(Row::SurveyData(record)) = row {
                let owner = Key::Survey(record.survey);
                let alive = match buffered(&owner) {
                    Some(row) => row.is_some(),
                    None => self.storage.get(&owner).is_some(),
                };
                if !alive {
                    return Err(SurveyError::aborted(format!(
                        "survey {} no longer exists for record {}",
                        record.survey, record.id
                    )));
                }
            }
        }

        let deleted: Vec<SurveyId> = writes
            .iter()
            .filter_map(|(key, row)| match (key, row) {
                (Key::Survey(id), None) => Some(*id),
                _ => None,
            })
            .collect();
        if deleted.is_empty() {
            return Ok(());
        }
        for (key, row) in self.storage.scan(RecordKind::SurveyData) {
            let Row::SurveyData(record) = row else { continue };
            if !deleted.contains(&record.survey) {
                continue;
            }
            let removed = matches!(buffered(&key), Some(None));
            if !removed {
                return Err(SurveyError::aborted(format!(
                    "survey {} gained record {} before its delete committed",
                    record.survey, record.id
                )));
            }
        }
        Ok(())
    }

    /// Run `f` inside a transaction, committing on `Ok` and rolling back on `Err`
    pub fn run<F, T>(&self, f: F) -> SurveyResult<T>
    where
        F: FnOnce(&mut TransactionContext) -> SurveyResult<T>,
    {
        let mut ctx = self.begin();
        match f(&mut ctx) {
            Ok(value) => {
                self.commit(&mut ctx)?;
                Ok(value)
            }
            Err(e) => {
                tracing::debug!(
                    target: "surveydb::txn",
                    txn_id = ctx.txn_id,
                    discarded = ctx.pending_writes(),
                    error = %e,
                    "Rolled back transaction"
                );
                ctx.abort();
                Err(e)
            }
        }
    }

    /// Storage this manager commits into
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_core::{DataBlob, RecordId, Survey, TypedRecord};
    use survey_storage::MemoryStorage;

    fn setup() -> (Arc<MemoryStorage>, TransactionManager) {
        let storage = Arc::new(MemoryStorage::new());
        let manager = TransactionManager::new(storage.clone());
        (storage, manager)
    }

    fn survey(id: u64) -> Row {
        Row::Survey(Survey::new(SurveyId::new(id), "s", ""))
    }

    #[test]
    fn test_run_commits_on_ok() {
        let (storage, manager) = setup();
        manager
            .run(|txn| {
                txn.put(survey(1));
                Ok(())
            })
            .unwrap();
        assert!(storage.get(&Key::Survey(SurveyId::new(1))).is_some());
        assert_eq!(storage.version(), 1);
    }

    #[test]
    fn test_run_rolls_back_on_err() {
        let (storage, manager) = setup();
        let result: SurveyResult<()> = manager.run(|txn| {
            txn.put(survey(1));
            Err(SurveyError::validation("nope"))
        });
        assert!(result.is_err());
        assert!(storage.scan(RecordKind::Survey).is_empty());
        assert_eq!(storage.version(), 0);
    }

    #[test]
    fn test_read_only_commit_does_not_bump_version() {
        let (storage, manager) = setup();
        let n = manager
            .run(|txn| Ok(txn.scan(RecordKind::Survey).len()))
            .unwrap();
        assert_eq!(n, 0);
        assert_eq!(storage.version(), 0);
    }

    #[test]
    fn test_commit_twice_fails() {
        let (_storage, manager) = setup();
        let mut ctx = manager.begin();
        ctx.put(survey(1));
        manager.commit(&mut ctx).unwrap();
        assert!(manager.commit(&mut ctx).is_err());
    }

    fn record(id: u64, survey: u64) -> Row {
        Row::SurveyData(TypedRecord {
            id: RecordId::new(id),
            survey: SurveyId::new(survey),
            record_type: "Answer".into(),
            data: DataBlob::new(),
        })
    }

    #[test]
    fn test_insert_under_concurrently_deleted_survey_aborts() {
        let (storage, manager) = setup();
        manager
            .run(|txn| {
                txn.put(survey(1));
                Ok(())
            })
            .unwrap();

        let mut insert = manager.begin();
        assert!(insert.get(&Key::Survey(SurveyId::new(1))).is_some());

        let mut delete = manager.begin();
        delete.delete(Key::Survey(SurveyId::new(1)));
        manager.commit(&mut delete).unwrap();

        insert.put(record(10, 1));
        let err = manager.commit(&mut insert).unwrap_err();
        assert!(matches!(err, SurveyError::TransactionAborted { .. }));
        assert_eq!(insert.status(), TransactionStatus::Aborted);
        assert!(storage.scan(RecordKind::SurveyData).is_empty());
    }

    #[test]
    fn test_delete_missing_concurrent_insert_aborts() {
        let (storage, manager) = setup();
        manager
            .run(|txn| {
                txn.put(survey(1));
                Ok(())
            })
            .unwrap();

        let mut delete = manager.begin();
        assert!(delete.scan(RecordKind::SurveyData).is_empty());
        delete.delete(Key::Survey(SurveyId::new(1)));

        let mut insert = manager.begin();
        insert.put(record(10, 1));
        manager.commit(&mut insert).unwrap();

        let err = manager.commit(&mut delete).unwrap_err();
        assert!(matches!(err, SurveyError::TransactionAborted { .. }));
        assert!(storage.get(&Key::Survey(SurveyId::new(1))).is_some());
        assert_eq!(storage.scan(RecordKind::SurveyData).len(), 1);
    }

    #[test]
    fn test_survey_and_records_in_one_write_set_commit() {
        let (storage, manager) = setup();
        manager
            .run(|txn| {
                txn.put(survey(2));
                txn.put(record(11, 2));
                Ok(())
            })
            .unwrap();
        assert_eq!(storage.scan(RecordKind::SurveyData).len(), 1);

        manager
            .run(|txn| {
                txn.delete(Key::Survey(SurveyId::new(2)));
                txn.delete(Key::SurveyData(RecordId::new(11)));
                Ok(())
            })
            .unwrap();
        assert!(storage.scan(RecordKind::SurveyData).is_empty());
    }

    #[test]
    fn test_txn_ids_are_monotonic() {
        let (_storage, manager) = setup();
        let a = manager.begin();
        let b = manager.begin();
        assert!(b.txn_id > a.txn_id);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn committed_ids_are_exactly_visible(
                ids in proptest::collection::btree_set(1u64..500, 0..20),
                fail in any::<bool>(),
            ) {
                let (storage, manager) = setup();
                let result: SurveyResult<()> = manager.run(|txn| {
                    for id in &ids {
                        txn.put(survey(*id));
                    }
                    if fail {
                        Err(SurveyError::validation("rejected"))
                    } else {
                        Ok(())
                    }
                });

                let visible: Vec<u64> = storage
                    .scan(RecordKind::Survey)
                    .into_iter()
                    .map(|(key, _)| match key {
                        Key::Survey(id) => id.as_u64(),
                        _ => 0,
                    })
                    .collect();
                if fail {
                    prop_assert!(result.is_err());
                    prop_assert!(visible.is_empty());
                } else {
                    prop_assert_eq!(visible, ids.into_iter().collect::<Vec<_>>());
                }
            }
        }
    }
}
