//! SQLite connection factory for the store pool.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use sqlx::{ConnectOptions, Connection, SqliteConnection};

use crate::infrastructure::pool::{ConnectionPool, PoolError, StoreConnector};

/// Pool of live SQLite connections.
pub type StorePool = ConnectionPool<SqliteConnector>;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens standalone SQLite connections from a database URL.
#[derive(Debug, Clone)]
pub struct SqliteConnector {
    options: SqliteConnectOptions,
}

impl SqliteConnector {
    /// Parse a `sqlite:` URL, e.g. `sqlite:questline.db?mode=rwc`.
    pub fn from_url(url: &str) -> Result<Self, PoolError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(PoolError::connect)?
            .create_if_missing(true)
            // Many pooled connections share one file.
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        Ok(Self { options })
    }
}

#[async_trait]
impl StoreConnector for SqliteConnector {
    type Connection = SqliteConnection;

    async fn connect(&self) -> Result<SqliteConnection, PoolError> {
        self.options.connect().await.map_err(PoolError::connect)
    }

    async fn close(&self, connection: SqliteConnection) -> Result<(), PoolError> {
        connection.close().await.map_err(PoolError::close)
    }
}
