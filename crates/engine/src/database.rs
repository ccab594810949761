//! Database handle
//!
//! Owns the storage, the transaction manager and the configuration. Two
//! flavours:
//!
//! - [`Database::ephemeral`]: memory only, default configuration
//! - [`Database::open`]: directory-backed; loads `survey.toml` and the
//!   `survey.json` snapshot, and writes the snapshot back on [`Database::flush`]
//!
//! # Example
//!
//! ```ignore
//! let db = Database::open("./data")?;
//! let surveys = db.transaction(|txn| txn.surveys())?;
//! db.flush()?;
//! ```

use crate::config::SurveyConfig;
use crate::records::RecordAccess;
use crate::serialize::ApiRoutes;
use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use survey_concurrency::{TransactionContext, TransactionManager};
use survey_core::SurveyResult;
use survey_storage::{MemoryStorage, StoreImage};

/// Name of the snapshot file inside a database directory
pub const SNAPSHOT_FILE: &str = "survey.json";

/// Shared database handle
pub struct Database {
    storage: Arc<MemoryStorage>,
    txn_manager: TransactionManager,
    config: RwLock<SurveyConfig>,
    data_dir: Option<PathBuf>,
}

impl Database {
    /// Memory-only database with the default configuration
    pub fn ephemeral() -> SurveyResult<Arc<Self>> {
        Self::ephemeral_with_config(SurveyConfig::default())
    }

    /// Memory-only database with an explicit configuration
    pub fn ephemeral_with_config(config: SurveyConfig) -> SurveyResult<Arc<Self>> {
        config.validate()?;
        let db = Self::assemble(MemoryStorage::new(), config, None);
        db.seed_record_types()?;
        Ok(Arc::new(db))
    }

    /// Open (or create) a directory-backed database
    pub fn open(dir: impl AsRef<Path>) -> SurveyResult<Arc<Self>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let config = SurveyConfig::load(dir)?;

        let snapshot = dir.join(SNAPSHOT_FILE);
        let storage = if snapshot.exists() {
            let image = StoreImage::read_from(&snapshot)?;
            tracing::info!(
                target: "surveydb::db",
                path = %snapshot.display(),
                surveys = image.surveys.len(),
                records = image.survey_data.len() + image.question_data.len(),
                "Loaded snapshot"
            );
            MemoryStorage::from_image(image)
        } else {
            MemoryStorage::new()
        };

        let db = Self::assemble(storage, config, Some(dir.to_path_buf()));
        db.seed_record_types()?;
        Ok(Arc::new(db))
    }

    fn assemble(storage: MemoryStorage, config: SurveyConfig, data_dir: Option<PathBuf>) -> Self {
        let storage = Arc::new(storage);
        Self {
            txn_manager: TransactionManager::new(storage.clone()),
            storage,
            config: RwLock::new(config),
            data_dir,
        }
    }

    /// Register configured record types that are not stored yet
    fn seed_record_types(&self) -> SurveyResult<()> {
        let seeds = self.config.read().record_types.clone();
        let added = self.transaction(|txn| {
            let mut added = 0usize;
            for rt in seeds {
                if txn.record_type(&rt.name).is_err() {
                    txn.save_record_type(rt);
                    added += 1;
                }
            }
            Ok(added)
        })?;
        if added > 0 {
            tracing::debug!(target: "surveydb::db", added, "Seeded record types");
        }
        Ok(())
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Run `f` in a transaction: committed on `Ok`, rolled back on `Err`
    pub fn transaction<F, T>(&self, f: F) -> SurveyResult<T>
    where
        F: FnOnce(&mut TransactionContext) -> SurveyResult<T>,
    {
        self.txn_manager.run(f)
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Snapshot of the current configuration
    pub fn config(&self) -> SurveyConfig {
        self.config.read().clone()
    }

    /// Modify the configuration; persisted to `survey.toml` for durable databases
    pub fn update_config<F>(&self, f: F) -> SurveyResult<()>
    where
        F: FnOnce(&mut SurveyConfig),
    {
        let mut updated = self.config();
        f(&mut updated);
        updated.validate()?;
        if let Some(dir) = &self.data_dir {
            updated.save(dir)?;
        }
        *self.config.write() = updated;
        self.seed_record_types()
    }

    /// Link builder for the configured base URL
    pub fn routes(&self) -> ApiRoutes {
        ApiRoutes::new(self.config.read().base_url.clone())
    }

    // =========================================================================
    // Durability
    // =========================================================================

    /// Directory backing this database, if any
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// True for directory-backed databases
    pub fn is_durable(&self) -> bool {
        self.data_dir.is_some()
    }

    /// Write the snapshot to disk (no-op for ephemeral databases)
    pub fn flush(&self) -> SurveyResult<()> {
        let Some(dir) = &self.data_dir else {
            return Ok(());
        };
        let image = self.storage.image();
        let path = dir.join(SNAPSHOT_FILE);
        image.write_to(&path)?;
        tracing::info!(
            target: "surveydb::db",
            path = %path.display(),
            version = image.version,
            "Flushed snapshot"
        );
        Ok(())
    }

    /// Committed store version
    pub fn version(&self) -> u64 {
        use survey_storage::Storage;
        self.storage.version()
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("storage", &self.storage)
            .field("data_dir", &self.data_dir)
            .finish()
    }
}
