//! Row storage for SurveyDB
//!
//! This crate provides the persistence layer under the transaction manager:
//! - `Storage`: the row-level contract (get, scan, atomic batch apply, id allocation)
//! - `MemoryStorage`: ordered in-memory tables, one per record kind
//! - `StoreImage`: JSON snapshot of the tables for durable databases

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod image;
pub mod memory;
pub mod row;
pub mod traits;

pub use image::{NextIds, StoreImage};
pub use memory::MemoryStorage;
pub use row::{Key, Row};
pub use traits::{Storage, Write};
