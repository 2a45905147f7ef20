//! Idempotent table bootstrap.

use super::StorePool;
use crate::infrastructure::ports::RepoError;

const CREATE_QUESTS: &str = r#"
    CREATE TABLE IF NOT EXISTS quests (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(255) NOT NULL UNIQUE,
        description TEXT NOT NULL,
        reward_coins BIGINT NOT NULL,
        reward_item TEXT
    )
"#;

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        uuid CHAR(36) PRIMARY KEY,
        balance BIGINT NOT NULL DEFAULT 0,
        locale VARCHAR(16) NOT NULL
    )
"#;

/// Create every backing table that does not exist yet.
///
/// Each table is attempted on its own connection and a failure is logged,
/// not raised. Returns `true` only when every table is in place.
pub async fn ensure_schema(pool: &StorePool) -> bool {
    let mut complete = true;

    for (table, ddl) in [("quests", CREATE_QUESTS), ("users", CREATE_USERS)] {
        match create_table(pool, ddl).await {
            Ok(()) => tracing::debug!(table, "Table ensured"),
            Err(e) => {
                complete = false;
                tracing::error!(
                    table,
                    error_class = e.class(),
                    error = %e,
                    "Failed to create table"
                );
            }
        }
    }

    complete
}

async fn create_table(pool: &StorePool, ddl: &str) -> Result<(), RepoError> {
    let mut conn = pool
        .acquire()
        .await
        .map_err(|e| RepoError::pool("schema.ensure", e))?;

    sqlx::query(ddl)
        .execute(&mut *conn)
        .await
        .map_err(|e| RepoError::database("schema.ensure", e))?;

    Ok(())
}
