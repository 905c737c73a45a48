//! ODBC connection to Splice Machine.
//!
//! **Requirements:**
//! - The `odbc` feature must be enabled
//! - The Splice Machine ODBC driver must be installed and registered
//!   (or its library path given as `connection.odbc_driver`)

use std::sync::Arc;

use async_trait::async_trait;
use odbc_api::{buffers::TextRowSet, ConnectionOptions, Cursor, Environment, ResultSetMetadata};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::ConnectionConfig;
use crate::core::traits::Connection;
use crate::core::value::{Row, RowSet};
use crate::error::{ReflectError, Result};

/// Rows fetched per round trip.
const FETCH_BATCH: usize = 1000;

/// Longest text value read from one cell. View definitions and column
/// defaults are `LONG VARCHAR`, so this is sized for them; anything longer
/// fails the fetch rather than coming back cut short.
const MAX_CELL_BYTES: usize = 65536;

/// A Splice Machine connection over ODBC.
///
/// Each statement runs on a fresh driver connection; the mutex keeps
/// statements from clones of the same handle in sequence.
#[derive(Clone)]
pub struct OdbcConnection {
    env: Arc<Environment>,
    connection_string: String,
    conn_mutex: Arc<Mutex<()>>,
}

impl OdbcConnection {
    /// Connect and verify the server answers.
    ///
    /// # Errors
    ///
    /// Returns `CatalogUnavailable` if the ODBC environment cannot be
    /// created, the driver is missing, or the server rejects the login.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let env = Environment::new().map_err(|e| {
            ReflectError::catalog(
                "ODBC environment",
                format!(
                    "Failed to create ODBC environment: {}. \
                     Make sure the Splice Machine ODBC driver is installed.",
                    e
                ),
            )
        })?;

        let connection_string = config.connection_string();
        debug!(
            "ODBC connection string (credentials hidden): {}",
            config.redacted_connection_string()
        );

        // Scope so the test connection is dropped before env moves
        {
            let conn = env
                .connect_with_connection_string(&connection_string, ConnectionOptions::default())
                .map_err(|e| {
                    ReflectError::catalog(
                        "ODBC connect",
                        format!(
                            "Failed to connect to Splice Machine via ODBC: {}. \
                             Check the driver name, host, and credentials.",
                            e
                        ),
                    )
                })?;
            conn.execute("VALUES 1", ()).map_err(|e| {
                ReflectError::catalog("VALUES 1", format!("Server did not answer: {}", e))
            })?;
        }

        info!(
            "Connected to Splice Machine via ODBC: {}:{}",
            config.host, config.port
        );

        Ok(Self {
            env: Arc::new(env),
            connection_string,
            conn_mutex: Arc::new(Mutex::new(())),
        })
    }

    /// Open a driver connection.
    fn get_connection(&self) -> Result<odbc_api::Connection<'_>> {
        self.env
            .connect_with_connection_string(&self.connection_string, ConnectionOptions::default())
            .map_err(|e| ReflectError::catalog("ODBC connect", format!("ODBC connection failed: {}", e)))
    }

    /// Run one statement and collect its header and text rows.
    fn execute_sync(&self, sql: &str) -> Result<RowSet> {
        let conn = self.get_connection()?;
        let fail = |what: &str, e: odbc_api::Error| ReflectError::catalog(sql, format!("{}: {}", what, e));

        let Some(mut cursor) = conn.execute(sql, ()).map_err(|e| fail("ODBC query failed", e))? else {
            return Ok(RowSet::empty());
        };

        let columns = cursor
            .column_names()
            .map_err(|e| fail("Failed to read column names", e))?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(|e| fail("Failed to read column names", e))?;
        let num_cols = columns.len();

        let mut buffers = TextRowSet::for_cursor(FETCH_BATCH, &mut cursor, Some(MAX_CELL_BYTES))
            .map_err(|e| fail("Failed to create row buffer", e))?;
        let mut row_cursor = cursor
            .bind_buffer(&mut buffers)
            .map_err(|e| fail("Failed to bind buffer", e))?;

        let mut rows = Vec::new();
        while let Some(batch) = row_cursor
            .fetch_with_truncation_check(true)
            .map_err(|e| fetch_error(sql, &columns, e))?
        {
            for row_idx in 0..batch.num_rows() {
                let mut row = Vec::with_capacity(num_cols);
                for col_idx in 0..num_cols {
                    let value = batch
                        .at(col_idx, row_idx)
                        .map(|bytes| String::from_utf8_lossy(bytes).to_string());
                    row.push(value);
                }
                rows.push(Row::new(row));
            }
        }

        Ok(RowSet::new(columns, rows))
    }
}

/// Describe a failed fetch, naming the column whose value overflowed its
/// buffer.
fn fetch_error(sql: &str, columns: &[String], e: odbc_api::Error) -> ReflectError {
    match e {
        odbc_api::Error::TooLargeValueForBuffer { buffer_index, .. } => {
            let column = columns
                .get(buffer_index)
                .map(String::as_str)
                .unwrap_or("?");
            ReflectError::catalog(
                sql,
                format!(
                    "Value of column {} exceeds {} bytes and would be truncated",
                    column, MAX_CELL_BYTES
                ),
            )
        }
        e => ReflectError::catalog(sql, format!("Failed to fetch rows: {}", e)),
    }
}

#[async_trait]
impl Connection for OdbcConnection {
    async fn execute(&mut self, sql: &str) -> Result<RowSet> {
        let _lock = self.conn_mutex.lock().await;
        debug!("Executing catalog query: {}", sql);
        self.execute_sync(sql)
    }
}
