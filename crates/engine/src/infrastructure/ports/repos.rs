//! Repository port traits for record storage.
//!
//! Every operation is one borrow -> statement -> return cycle against the
//! store. "Not found" is `Ok(None)` / `Ok(false)`, never an error.

use async_trait::async_trait;
use questline_domain::{ActorId, Quest, QuestId, UserProfile};

use super::error::RepoError;

// =============================================================================
// Database Ports (one per entity type)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestRepo: Send + Sync {
    /// Insert a new quest; the store assigns its id. `true` iff a row was written.
    async fn create(&self, quest: &Quest) -> Result<bool, RepoError>;
    /// Look a quest up by its unique name.
    async fn get(&self, name: &str) -> Result<Option<Quest>, RepoError>;
    async fn get_by_id(&self, id: QuestId) -> Result<Option<Quest>, RepoError>;
    /// Overwrite every mutable field by id. Fails with `ContractViolation` if the quest has no id.
    async fn update(&self, quest: &Quest) -> Result<bool, RepoError>;
    async fn delete(&self, id: QuestId) -> Result<bool, RepoError>;
    /// All quests, skipping rows that fail to resolve individually.
    async fn list(&self) -> Result<Vec<Quest>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create(&self, profile: &UserProfile) -> Result<bool, RepoError>;
    async fn get(&self, id: ActorId) -> Result<Option<UserProfile>, RepoError>;
    async fn update(&self, profile: &UserProfile) -> Result<bool, RepoError>;
    async fn delete(&self, id: ActorId) -> Result<bool, RepoError>;
    async fn list(&self) -> Result<Vec<UserProfile>, RepoError>;
}
