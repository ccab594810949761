//! Database command handlers: Ping, Info, Flush, ConfigGet.

use std::sync::Arc;

use survey_engine::RecordAccess;

use crate::bridge::Primitives;
use crate::convert::convert_result;
use crate::output::DatabaseInfo;
use crate::{Output, Result};

/// Handle Ping command.
pub fn ping() -> Result<Output> {
    Ok(Output::Pong {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle Info command.
pub fn info(p: &Arc<Primitives>) -> Result<Output> {
    let (surveys, record_types) = convert_result(
        p.db
            .transaction(|txn| Ok((txn.surveys()?.len(), txn.record_types()?.len()))),
    )?;
    Ok(Output::DatabaseInfo(DatabaseInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        durable: p.db.is_durable(),
        data_dir: p.db.data_dir().map(|d| d.display().to_string()),
        store_version: p.db.version(),
        surveys,
        record_types,
    }))
}

/// Handle Flush command: write the snapshot (no-op when ephemeral).
pub fn flush(p: &Arc<Primitives>) -> Result<Output> {
    convert_result(p.db.flush())?;
    Ok(Output::Unit)
}

/// Handle ConfigGet command: return the current database configuration.
pub fn config_get(p: &Arc<Primitives>) -> Result<Output> {
    Ok(Output::Config(p.db.config()))
}
