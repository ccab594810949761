//! Transactions for SurveyDB
//!
//! Buffered write sets over [`survey_storage::Storage`] with atomic commit:
//! - `TransactionContext`: isolated read-your-writes view, rolled back on drop
//! - `TransactionManager`: begin / commit / `run(|txn| ...)`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod manager;
pub mod transaction;

pub use manager::TransactionManager;
pub use transaction::{TransactionContext, TransactionStatus};
