//! Ordered schema steps. Step `n` (1-based) moves `user_version` to `n`, so
//! steps are append-only and never reordered.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;
use std::cmp::Ordering;

const STEPS: &[&str] = &[
    include_str!("0001_init.sql"),
    include_str!("0002_published_index.sql"),
];

/// Schema version this binary writes.
pub fn latest_version() -> u32 {
    STEPS.len() as u32
}

/// Schema version recorded in the database file.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Runs every pending step in one transaction.
///
/// # Errors
/// - `DbError::SchemaTooNew` when the file is ahead of this binary.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    let pending = match found.cmp(&supported) {
        Ordering::Greater => return Err(DbError::SchemaTooNew { found, supported }),
        Ordering::Equal => return Ok(()),
        Ordering::Less => &STEPS[found as usize..],
    };

    let tx = conn.transaction()?;
    for (version, sql) in (found + 1..).zip(pending) {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={found} to_version={supported}");
    Ok(())
}
