//! SQLite-backed record store.
//!
//! # Design
//! `Store` owns one `rusqlite::Connection` behind a mutex and exposes four
//! primitives (`execute`, `query_one`, `query_all`, `close`). Each call hops
//! onto the blocking pool so the async runtime never waits on disk I/O. The
//! store knows the table schema but nothing about records; row mapping is
//! supplied by the caller.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};

use crate::error::StoreError;

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    completed INTEGER NOT NULL DEFAULT 0,
    createdAt TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updatedAt TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);";

/// Positional statement parameters, bound to `?1`, `?2`, ... in order.
pub type Params = Vec<Value>;

/// Metadata returned by [`Store::execute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOutcome {
    pub rows_affected: usize,
    /// Rowid of the most recent successful INSERT on this connection.
    pub last_insert_id: i64,
}

#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Option<Connection>>>,
}

impl Store {
    /// Open (or create) the database file at `path` and ensure the table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        tracing::info!(path = %path.display(), "opened record store");
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(Some(conn))),
        })
    }

    /// Lock the connection and run `f` against it.
    ///
    /// A poisoned mutex is recovered: the connection itself is still usable.
    fn with_conn<F, R>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&Connection) -> Result<R, StoreError>,
    {
        let guard = self
            .conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match guard.as_ref() {
            Some(conn) => f(conn),
            None => Err(StoreError::Closed),
        }
    }

    async fn blocking<F, R>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&Connection) -> Result<R, StoreError> + Send + 'static,
        R: Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.with_conn(f))
            .await
            .map_err(|e| StoreError::Join(e.to_string()))?
    }

    pub async fn execute(&self, sql: &str, params: Params) -> Result<ExecOutcome, StoreError> {
        let sql = sql.to_string();
        self.blocking(move |conn| {
            tracing::debug!(%sql, "execute");
            let rows_affected = conn.execute(&sql, params_from_iter(params))?;
            Ok(ExecOutcome {
                rows_affected,
                last_insert_id: conn.last_insert_rowid(),
            })
        })
        .await
    }

    /// Run a query expected to yield at most one row.
    pub async fn query_one<T, F>(&self, sql: &str, params: Params, map: F) -> Result<Option<T>, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T> + Send + 'static,
    {
        let sql = sql.to_string();
        self.blocking(move |conn| {
            tracing::debug!(%sql, "query_one");
            let row = conn
                .query_row(&sql, params_from_iter(params), map)
                .optional()?;
            Ok(row)
        })
        .await
    }

    /// Run a query and collect every row in the order the statement yields them.
    pub async fn query_all<T, F>(&self, sql: &str, params: Params, mut map: F) -> Result<Vec<T>, StoreError>
    where
        T: Send + 'static,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T> + Send + 'static,
    {
        let sql = sql.to_string();
        self.blocking(move |conn| {
            tracing::debug!(%sql, "query_all");
            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(params))?;
            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                out.push(map(row)?);
            }
            Ok(out)
        })
        .await
    }

    /// Release the connection. Later calls on any clone fail with [`StoreError::Closed`].
    pub async fn close(&self) -> Result<(), StoreError> {
        let slot = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let conn = slot
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .take();
            match conn {
                Some(conn) => conn.close().map_err(|(_, err)| StoreError::Sqlite(err)),
                None => Ok(()),
            }
        })
        .await
        .map_err(|e| StoreError::Join(e.to_string()))?
    }
}
