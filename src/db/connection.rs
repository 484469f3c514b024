//! Database connection management.
//!
//! Every unit of work opens its own connection from an explicit [`DbConfig`]
//! and closes it on the way out; there is no pool and no connection reuse
//! across calls. [`Database::with_connection`] is the scoped-acquisition
//! entry point: work runs inside a transaction that commits on success and
//! rolls back on any error, and the connection is released on every exit
//! path.

use diesel::mysql::MysqlConnection;
use diesel::prelude::*;
use diesel::sql_query;
use tracing::{debug, warn};

use crate::config::DbConfig;
use crate::error::{PipelineError, Result};

/// Handle to the configured MySQL database.
///
/// Owns the connection settings; opening connections is deferred to each
/// operation.
///
/// # Example
///
/// ```ignore
/// use medfeed::{Database, DbConfig};
///
/// let db = Database::new(DbConfig::from_env()?);
/// let count = db.with_connection(|conn| {
///     // queries here run in one transaction
///     Ok(0)
/// })?;
/// ```
pub struct Database {
    config: DbConfig,
}

impl Database {
    pub fn new(config: DbConfig) -> Self {
        Database { config }
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Open a fresh connection to the configured database.
    pub fn connect(&self) -> Result<MysqlConnection> {
        let conn =
            MysqlConnection::establish(&self.config.url()).map_err(PipelineError::Connection)?;
        debug!(
            host = %self.config.host,
            database = %self.config.database,
            "connected to MySQL"
        );
        Ok(conn)
    }

    /// Run `work` as one scoped unit of work.
    ///
    /// A fresh connection is opened, `work` runs inside a transaction, and
    /// the connection is dropped afterwards. Returning `Ok` commits;
    /// returning `Err` rolls back and propagates the error.
    pub fn with_connection<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&mut MysqlConnection) -> Result<T>,
    {
        let mut conn = self.connect()?;
        conn.transaction(|conn| work(conn))
    }

    /// Throwaway connect/verify/disconnect cycle.
    ///
    /// Returns `false` instead of propagating any error, so it is safe to
    /// call at startup or from a health check.
    pub fn test_connection(&self) -> bool {
        match self.connect() {
            Ok(mut conn) => match sql_query("SELECT 1").execute(&mut conn) {
                Ok(_) => true,
                Err(e) => {
                    warn!(error = %e, "connection verification query failed");
                    false
                }
            },
            Err(e) => {
                warn!(error = %e, "connection test failed");
                false
            }
        }
    }

    /// Create the configured database if it does not exist.
    ///
    /// Connects to the server with no schema selected; the database name
    /// comes from trusted configuration, not user input.
    pub fn create_database(&self) -> Result<()> {
        let mut conn = MysqlConnection::establish(&self.config.server_url())
            .map_err(PipelineError::Connection)?;

        let ddl = format!(
            "CREATE DATABASE IF NOT EXISTS `{}` CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci",
            self.config.database
        );
        sql_query(ddl).execute(&mut conn)?;

        debug!(database = %self.config.database, "database present");
        Ok(())
    }
}
