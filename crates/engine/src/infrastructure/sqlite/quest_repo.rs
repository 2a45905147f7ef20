//! Quest repository over the `quests` table.

use std::sync::Arc;

use async_trait::async_trait;
use questline_domain::{Quest, QuestId, QuestName, RewardCoins};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{SqliteConnector, StorePool};
use crate::infrastructure::payload;
use crate::infrastructure::pool::PooledConnection;
use crate::infrastructure::ports::{QuestRepo, RepoError};

const SELECT_COLUMNS: &str = "SELECT id, name, description, reward_coins, reward_item FROM quests";

pub struct SqliteQuestRepo {
    pool: Arc<StorePool>,
}

impl SqliteQuestRepo {
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

fn row_to_quest(row: &SqliteRow) -> Result<Quest, RepoError> {
    let id: i64 = row.try_get("id").map_err(RepoError::serialization)?;
    let name: String = row.try_get("name").map_err(RepoError::serialization)?;
    let description: String = row
        .try_get("description")
        .map_err(RepoError::serialization)?;
    let reward_coins: i64 = row
        .try_get("reward_coins")
        .map_err(RepoError::serialization)?;
    let reward_item: Option<String> = row
        .try_get("reward_item")
        .map_err(RepoError::serialization)?;

    let reward_item = reward_item.as_deref().and_then(|text| {
        let decoded = payload::decode(text);
        if decoded.is_none() {
            tracing::warn!(quest_id = id, "Quest read without its reward item");
        }
        decoded
    });

    Ok(Quest {
        id: Some(QuestId::new(id)),
        name: QuestName::new(name).map_err(RepoError::serialization)?,
        description,
        reward_coins: RewardCoins::new(reward_coins).map_err(RepoError::serialization)?,
        reward_item,
    })
}

#[async_trait]
impl QuestRepo for SqliteQuestRepo {
    async fn create(&self, quest: &Quest) -> Result<bool, RepoError> {
        let mut conn = self.connection("quests.create").await?;

        // Identity is always assigned by the store; any id on the input is ignored.
        let result = sqlx::query(
            "INSERT INTO quests (name, description, reward_coins, reward_item) VALUES (?, ?, ?, ?)",
        )
        .bind(quest.name.as_str())
        .bind(&quest.description)
        .bind(quest.reward_coins.amount())
        .bind(quest.reward_item.as_ref().map(payload::encode))
        .execute(&mut *conn)
        .await
        .map_err(|e| RepoError::database("quests.create", e))?;

        tracing::debug!(quest_name = %quest.name, "Quest inserted");
        Ok(result.rows_affected() > 0)
    }

    async fn get(&self, name: &str) -> Result<Option<Quest>, RepoError> {
        let mut conn = self.connection("quests.get").await?;

        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE name = ?"))
            .bind(name)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| RepoError::database("quests.get", e))?;

        row.as_ref().map(row_to_quest).transpose()
    }

    async fn get_by_id(&self, id: QuestId) -> Result<Option<Quest>, RepoError> {
        let mut conn = self.connection("quests.get_by_id").await?;

        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.raw())
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| RepoError::database("quests.get_by_id", e))?;

        row.as_ref().map(row_to_quest).transpose()
    }

    async fn update(&self, quest: &Quest) -> Result<bool, RepoError> {
        let Some(id) = quest.id else {
            return Err(RepoError::contract(format!(
                "quests.update called on unsaved quest '{}'",
                quest.name
            )));
        };

        let mut conn = self.connection("quests.update").await?;

        let result = sqlx::query(
            "UPDATE quests SET name = ?, description = ?, reward_coins = ?, reward_item = ? WHERE id = ?",
        )
        .bind(quest.name.as_str())
        .bind(&quest.description)
        .bind(quest.reward_coins.amount())
        .bind(quest.reward_item.as_ref().map(payload::encode))
        .bind(id.raw())
        .execute(&mut *conn)
        .await
        .map_err(|e| RepoError::database("quests.update", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: QuestId) -> Result<bool, RepoError> {
        let mut conn = self.connection("quests.delete").await?;

        let result = sqlx::query("DELETE FROM quests WHERE id = ?")
            .bind(id.raw())
            .execute(&mut *conn)
            .await
            .map_err(|e| RepoError::database("quests.delete", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<Quest>, RepoError> {
        // The id borrow ends before any per-row lookup borrows again.
        let ids: Vec<i64> = {
            let mut conn = self.connection("quests.list").await?;
            sqlx::query_scalar("SELECT id FROM quests ORDER BY id")
                .fetch_all(&mut *conn)
                .await
                .map_err(|e| RepoError::database("quests.list", e))?
        };

        let mut quests = Vec::with_capacity(ids.len());
        for id in ids.into_iter().map(QuestId::new) {
            match self.get_by_id(id).await {
                Ok(Some(quest)) => quests.push(quest),
                Ok(None) => tracing::debug!(quest_id = %id, "Quest removed while listing"),
                Err(e) => {
                    tracing::warn!(quest_id = %id, error = %e, "Skipping quest that failed to load");
                }
            }
        }

        Ok(quests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sqlite::testing::store_pool;
    use questline_domain::RewardItem;

    fn quest(name: &str, coins: i64) -> Quest {
        Quest::new(
            QuestName::new(name).unwrap(),
            format!("{name} description"),
            RewardCoins::new(coins).unwrap(),
        )
    }

    #[tokio::test]
    async fn create_then_get_returns_equal_quest() {
        let (_dir, pool) = store_pool(2).await;
        let repo = SqliteQuestRepo::new(pool);
        let original = quest("Defeat the Dragon", 500)
            .with_reward_item(RewardItem::from_bytes(b"diamond_sword:1".to_vec()));

        assert!(repo.create(&original).await.unwrap());

        let stored = repo.get("Defeat the Dragon").await.unwrap().unwrap();
        assert!(stored.id.is_some());
        assert!(stored.same_content(&original));
    }

    #[tokio::test]
    async fn empty_reward_item_round_trips() {
        let (_dir, pool) = store_pool(1).await;
        let repo = SqliteQuestRepo::new(pool);
        let original = quest("Empty", 0).with_reward_item(RewardItem::from_bytes(Vec::new()));

        assert!(repo.create(&original).await.unwrap());

        let stored = repo.get("Empty").await.unwrap().unwrap();
        assert_eq!(stored.reward_item, Some(RewardItem::from_bytes(Vec::new())));
        assert!(stored.same_content(&original));
    }

    #[tokio::test]
    async fn get_missing_is_none() {
        let (_dir, pool) = store_pool(1).await;
        let repo = SqliteQuestRepo::new(pool);
        assert!(repo.get("nobody").await.unwrap().is_none());
        assert!(repo.get_by_id(QuestId::new(42)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected_by_store() {
        let (_dir, pool) = store_pool(1).await;
        let repo = SqliteQuestRepo::new(pool);
        assert!(repo.create(&quest("Twin", 1)).await.unwrap());

        let err = repo.create(&quest("Twin", 2)).await.unwrap_err();
        assert_eq!(err.class(), "database");
    }

    #[tokio::test]
    async fn update_overwrites_fields_by_id() {
        let (_dir, pool) = store_pool(1).await;
        let repo = SqliteQuestRepo::new(pool);
        repo.create(&quest("Gather Herbs", 10)).await.unwrap();
        let mut stored = repo.get("Gather Herbs").await.unwrap().unwrap();

        stored.description = "Pick twelve moonpetals".into();
        stored.reward_coins = RewardCoins::new(25).unwrap();
        assert!(repo.update(&stored).await.unwrap());

        let reread = repo.get_by_id(stored.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(reread, stored);
    }

    #[tokio::test]
    async fn update_of_missing_row_is_false() {
        let (_dir, pool) = store_pool(1).await;
        let repo = SqliteQuestRepo::new(pool);
        let ghost = quest("Ghost", 0).with_id(QuestId::new(999));
        assert!(!repo.update(&ghost).await.unwrap());
    }

    #[tokio::test]
    async fn update_without_id_is_contract_violation() {
        let (_dir, pool) = store_pool(1).await;
        let repo = SqliteQuestRepo::new(pool.clone());
        let err = repo.update(&quest("Unsaved", 0)).await.unwrap_err();
        assert!(err.is_contract_violation());
        assert_eq!(pool.available(), 1);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (_dir, pool) = store_pool(1).await;
        let repo = SqliteQuestRepo::new(pool);
        repo.create(&quest("Once", 1)).await.unwrap();
        let id = repo.get("Once").await.unwrap().unwrap().id.unwrap();

        assert!(repo.delete(id).await.unwrap());
        assert!(!repo.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn undecodable_payload_degrades_to_no_item() {
        let (_dir, pool) = store_pool(1).await;
        {
            let mut conn = pool.acquire().await.unwrap();
            sqlx::query(
                "INSERT INTO quests (name, description, reward_coins, reward_item) VALUES ('Cursed', 'Broken loot', 7, '@@not-base64@@')",
            )
            .execute(&mut *conn)
            .await
            .unwrap();
        }
        let repo = SqliteQuestRepo::new(pool);

        let stored = repo.get("Cursed").await.unwrap().unwrap();
        assert_eq!(stored.reward_coins.amount(), 7);
        assert!(stored.reward_item.is_none());
    }

    #[tokio::test]
    async fn list_works_with_single_connection() {
        let (_dir, pool) = store_pool(1).await;
        let repo = SqliteQuestRepo::new(pool);
        for (name, coins) in [("First", 1), ("Second", 2), ("Third", 3)] {
            repo.create(&quest(name, coins)).await.unwrap();
        }

        let quests = repo.list().await.unwrap();
        let names: Vec<&str> = quests.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn operations_fail_after_drain() {
        let (_dir, pool) = store_pool(1).await;
        let repo = SqliteQuestRepo::new(pool.clone());
        pool.drain().await;

        let err = repo.get("anything").await.unwrap_err();
        assert_eq!(err.class(), "pool");
    }
}
