// src/configdb/connection.rs

use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use super::error::{DbError, DbResult};

pub struct DbConnection;

impl DbConnection {
    /// Open an existing configuration database read-only.
    pub fn open_read(path: &Path) -> DbResult<Connection> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        )
        .map_err(|e| DbError::OpenFailed(path.to_path_buf(), e))?;
        debug!("Opened {:?} read-only", path.file_name());
        Ok(conn)
    }

    /// Open an existing configuration database for updates.
    ///
    /// PRAGMA settings are connection-specific, so they are applied on
    /// every open rather than once per database file.
    pub fn open_write(path: &Path) -> DbResult<Connection> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::OpenFailed(path.to_path_buf(), e))?;
        conn.execute_batch(
            "PRAGMA foreign_keys=ON;
             PRAGMA busy_timeout=5000;",
        )?;
        debug!("Opened {:?} for update", path.file_name());
        Ok(conn)
    }
}
