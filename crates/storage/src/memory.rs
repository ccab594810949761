//! In-memory row storage
//!
//! One ordered table per record kind behind a single `RwLock`, so a commit
//! batch that touches several kinds (a survey plus its control records) is
//! applied under one write guard.
//!
//! # Design
//!
//! - BTreeMap per kind: ordered scans, deterministic list output
//! - parking_lot RwLock: concurrent readers, exclusive batch apply
//! - Atomic id counters per kind: allocation never blocks on the table lock
//!
//! # Example
//!
//! ```ignore
//! use survey_storage::{MemoryStorage, Storage};
//!
//! let storage = MemoryStorage::new();
//! let id = storage.allocate_id(RecordKind::Survey);
//! ```

use crate::image::StoreImage;
use crate::row::{Key, Row};
use crate::traits::{Storage, Write};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use survey_core::{RecordKind, SurveyResult};

/// Ordered rows of every kind
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) surveys: BTreeMap<Key, Row>,
    pub(crate) record_types: BTreeMap<Key, Row>,
    pub(crate) survey_data: BTreeMap<Key, Row>,
    pub(crate) question_data: BTreeMap<Key, Row>,
}

impl Tables {
    fn table(&self, kind: RecordKind) -> &BTreeMap<Key, Row> {
        match kind {
            RecordKind::Survey => &self.surveys,
            RecordKind::RecordType => &self.record_types,
            RecordKind::SurveyData => &self.survey_data,
            RecordKind::QuestionData => &self.question_data,
        }
    }

    fn table_mut(&mut self, kind: RecordKind) -> &mut BTreeMap<Key, Row> {
        match kind {
            RecordKind::Survey => &mut self.surveys,
            RecordKind::RecordType => &mut self.record_types,
            RecordKind::SurveyData => &mut self.survey_data,
            RecordKind::QuestionData => &mut self.question_data,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.surveys.len() + self.record_types.len() + self.survey_data.len() + self.question_data.len()
    }
}

/// Id counters, one per numerically-keyed kind
#[derive(Debug, Default)]
pub(crate) struct IdCounters {
    pub(crate) survey: AtomicU64,
    pub(crate) survey_data: AtomicU64,
    pub(crate) question_data: AtomicU64,
}

impl IdCounters {
    fn counter(&self, kind: RecordKind) -> Option<&AtomicU64> {
        match kind {
            RecordKind::Survey => Some(&self.survey),
            RecordKind::SurveyData => Some(&self.survey_data),
            RecordKind::QuestionData => Some(&self.question_data),
            RecordKind::RecordType => None,
        }
    }
}

/// In-memory [`Storage`] implementation
///
/// # Thread Safety
///
/// All operations are thread-safe. Reads take the shared lock; `apply` takes
/// the exclusive lock for the whole batch.
pub struct MemoryStorage {
    tables: RwLock<Tables>,
    ids: IdCounters,
    version: AtomicU64,
}

impl MemoryStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            ids: IdCounters::default(),
            version: AtomicU64::new(0),
        }
    }

    /// Rebuild storage from a snapshot image
    pub fn from_image(image: StoreImage) -> Self {
        let storage = Self::new();
        {
            let mut tables = storage.tables.write();
            for row in image.rows() {
                let key = row.key();
                tables.table_mut(key.kind()).insert(key, row);
            }
        }
        storage.ids.survey.store(image.next_ids.survey, Ordering::Release);
        storage
            .ids
            .survey_data
            .store(image.next_ids.survey_data, Ordering::Release);
        storage
            .ids
            .question_data
            .store(image.next_ids.question_data, Ordering::Release);
        storage.version.store(image.version, Ordering::Release);
        storage
    }

    /// Capture a consistent snapshot image of every table
    pub fn image(&self) -> StoreImage {
        let tables = self.tables.read();
        StoreImage::capture(&tables, &self.ids, self.version.load(Ordering::Acquire))
    }

    /// Total number of stored rows
    pub fn total_rows(&self) -> usize {
        self.tables.read().len()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStorage")
            .field("version", &self.version())
            .field("total_rows", &self.total_rows())
            .finish()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &Key) -> Option<Row> {
        self.tables.read().table(key.kind()).get(key).cloned()
    }

    fn scan(&self, kind: RecordKind) -> Vec<(Key, Row)> {
        self.tables
            .read()
            .table(kind)
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn apply(&self, writes: Vec<Write>) -> SurveyResult<u64> {
        let mut tables = self.tables.write();
        let count = writes.len();
        for (key, row) in writes {
            let table = tables.table_mut(key.kind());
            match row {
                Some(row) => {
                    table.insert(key, row);
                }
                None => {
                    table.remove(&key);
                }
            }
        }
        let version = self.version.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::trace!(target: "surveydb::storage", version, writes = count, "Applied batch");
        Ok(version)
    }

    fn allocate_id(&self, kind: RecordKind) -> u64 {
        match self.ids.counter(kind) {
            Some(counter) => counter.fetch_add(1, Ordering::AcqRel) + 1,
            // Record types are keyed by name; callers never allocate for them.
            None => 0,
        }
    }

    fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }
}
