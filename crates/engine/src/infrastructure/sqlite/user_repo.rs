//! User profile repository over the `users` table.

use std::sync::Arc;

use async_trait::async_trait;
use questline_domain::{ActorId, UserProfile};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{SqliteConnector, StorePool};
use crate::infrastructure::pool::PooledConnection;
use crate::infrastructure::ports::{RepoError, UserRepo};

pub struct SqliteUserRepo {
    pool: Arc<StorePool>,
}

impl SqliteUserRepo {
    pub fn new(pool: Arc<StorePool>) -> Self {
        Self { pool }
    }

    async fn connection(
        &self,
        operation: &'static str,
    ) -> Result<PooledConnection<'_, SqliteConnector>, RepoError> {
        self.pool
            .acquire()
            .await
            .map_err(|e| RepoError::pool(operation, e))
    }
}

fn row_to_profile(row: &SqliteRow) -> Result<UserProfile, RepoError> {
    let uuid: String = row.try_get("uuid").map_err(RepoError::serialization)?;
    let balance: i64 = row.try_get("balance").map_err(RepoError::serialization)?;
    let locale: String = row.try_get("locale").map_err(RepoError::serialization)?;

    Ok(UserProfile {
        id: uuid.parse().map_err(RepoError::serialization)?,
        balance,
        locale,
    })
}

#[async_trait]
impl UserRepo for SqliteUserRepo {
    async fn create(&self, profile: &UserProfile) -> Result<bool, RepoError> {
        let mut conn = self.connection("users.create").await?;

        let result = sqlx::query("INSERT INTO users (uuid, balance, locale) VALUES (?, ?, ?)")
            .bind(profile.id.to_string())
            .bind(profile.balance)
            .bind(&profile.locale)
            .execute(&mut *conn)
            .await
            .map_err(|e| RepoError::database("users.create", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn get(&self, id: ActorId) -> Result<Option<UserProfile>, RepoError> {
        let mut conn = self.connection("users.get").await?;

        let row = sqlx::query("SELECT uuid, balance, locale FROM users WHERE uuid = ?")
            .bind(id.to_string())
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| RepoError::database("users.get", e))?;

        row.as_ref().map(row_to_profile).transpose()
    }

    async fn update(&self, profile: &UserProfile) -> Result<bool, RepoError> {
        let mut conn = self.connection("users.update").await?;

        let result = sqlx::query("UPDATE users SET balance = ?, locale = ? WHERE uuid = ?")
            .bind(profile.balance)
            .bind(&profile.locale)
            .bind(profile.id.to_string())
            .execute(&mut *conn)
            .await
            .map_err(|e| RepoError::database("users.update", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: ActorId) -> Result<bool, RepoError> {
        let mut conn = self.connection("users.delete").await?;

        let result = sqlx::query("DELETE FROM users WHERE uuid = ?")
            .bind(id.to_string())
            .execute(&mut *conn)
            .await
            .map_err(|e| RepoError::database("users.delete", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<UserProfile>, RepoError> {
        let keys: Vec<String> = {
            let mut conn = self.connection("users.list").await?;
            sqlx::query_scalar("SELECT uuid FROM users ORDER BY uuid")
                .fetch_all(&mut *conn)
                .await
                .map_err(|e| RepoError::database("users.list", e))?
        };

        let mut profiles = Vec::with_capacity(keys.len());
        for key in keys {
            let id: ActorId = match key.parse() {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!(uuid = %key, error = %e, "Skipping user row with malformed key");
                    continue;
                }
            };
            match self.get(id).await {
                Ok(Some(profile)) => profiles.push(profile),
                Ok(None) => tracing::debug!(actor_id = %id, "User removed while listing"),
                Err(e) => {
                    tracing::warn!(actor_id = %id, error = %e, "Skipping user that failed to load");
                }
            }
        }

        Ok(profiles)
    }
}
