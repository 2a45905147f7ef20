//! Quest façade.

use std::sync::Arc;

use questline_domain::{Quest, QuestId};

use super::report_failure;
use crate::infrastructure::ports::{ContractViolation, QuestRepo, RepoError};

pub struct Quests {
    repo: Arc<dyn QuestRepo>,
}

impl Quests {
    pub fn new(repo: Arc<dyn QuestRepo>) -> Self {
        Self { repo }
    }

    /// Persist a new quest. `false` when nothing was written, including a duplicate name.
    pub async fn create(&self, quest: &Quest) -> bool {
        match self.repo.create(quest).await {
            Ok(written) => written,
            Err(e) => {
                report_failure("quests.create", &e);
                false
            }
        }
    }

    pub async fn get(&self, name: &str) -> Option<Quest> {
        match self.repo.get(name).await {
            Ok(quest) => quest,
            Err(e) => {
                report_failure("quests.get", &e);
                None
            }
        }
    }

    pub async fn get_by_id(&self, id: QuestId) -> Option<Quest> {
        match self.repo.get_by_id(id).await {
            Ok(quest) => quest,
            Err(e) => {
                report_failure("quests.get_by_id", &e);
                None
            }
        }
    }

    /// Overwrite a stored quest.
    ///
    /// # Errors
    ///
    /// Returns `ContractViolation` when the quest was never persisted (has no id).
    /// Store failures are logged and reported as `Ok(false)`.
    pub async fn update(&self, quest: &Quest) -> Result<bool, ContractViolation> {
        match self.repo.update(quest).await {
            Ok(updated) => Ok(updated),
            Err(RepoError::ContractViolation(message)) => Err(ContractViolation {
                operation: "quests.update",
                message,
            }),
            Err(e) => {
                report_failure("quests.update", &e);
                Ok(false)
            }
        }
    }

    pub async fn delete(&self, id: QuestId) -> bool {
        match self.repo.delete(id).await {
            Ok(deleted) => deleted,
            Err(e) => {
                report_failure("quests.delete", &e);
                false
            }
        }
    }

    pub async fn list(&self) -> Vec<Quest> {
        match self.repo.list().await {
            Ok(quests) => quests,
            Err(e) => {
                report_failure("quests.list", &e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::pool::PoolError;
    use crate::infrastructure::ports::MockQuestRepo;
    use questline_domain::{QuestName, RewardCoins};

    fn dragon() -> Quest {
        Quest::new(
            QuestName::new("Defeat the Dragon").unwrap(),
            "Slay the ancient dragon",
            RewardCoins::new(500).unwrap(),
        )
    }

    #[tokio::test]
    async fn create_passes_through_written_flag() {
        let mut repo = MockQuestRepo::new();
        repo.expect_create()
            .withf(|quest| quest.name.as_str() == "Defeat the Dragon")
            .times(1)
            .returning(|_| Ok(true));

        let quests = Quests::new(Arc::new(repo));
        assert!(quests.create(&dragon()).await);
    }

    #[tokio::test]
    async fn create_store_failure_becomes_false() {
        let mut repo = MockQuestRepo::new();
        repo.expect_create()
            .returning(|_| Err(RepoError::database("quests.create", "UNIQUE constraint failed")));

        let quests = Quests::new(Arc::new(repo));
        assert!(!quests.create(&dragon()).await);
    }

    #[tokio::test]
    async fn get_folds_not_found_and_failure_to_none() {
        let mut repo = MockQuestRepo::new();
        repo.expect_get()
            .withf(|name| name == "missing")
            .returning(|_| Ok(None));
        repo.expect_get()
            .withf(|name| name == "broken")
            .returning(|_| Err(RepoError::pool("quests.get", PoolError::Closed)));

        let quests = Quests::new(Arc::new(repo));
        assert!(quests.get("missing").await.is_none());
        assert!(quests.get("broken").await.is_none());
    }

    #[tokio::test]
    async fn update_contract_violation_is_not_swallowed() {
        let mut repo = MockQuestRepo::new();
        repo.expect_update()
            .returning(|_| Err(RepoError::contract("quests.update called on unsaved quest")));

        let quests = Quests::new(Arc::new(repo));
        let err = quests.update(&dragon()).await.unwrap_err();
        assert_eq!(err.operation, "quests.update");
    }

    #[tokio::test]
    async fn update_store_failure_is_false() {
        let mut repo = MockQuestRepo::new();
        repo.expect_update()
            .returning(|_| Err(RepoError::database("quests.update", "disk I/O error")));

        let quests = Quests::new(Arc::new(repo));
        let saved = dragon().with_id(QuestId::new(1));
        assert_eq!(quests.update(&saved).await, Ok(false));
    }

    #[tokio::test]
    async fn delete_and_list_fold_failures() {
        let mut repo = MockQuestRepo::new();
        repo.expect_delete()
            .returning(|_| Err(RepoError::database("quests.delete", "locked")));
        repo.expect_list()
            .returning(|| Err(RepoError::pool("quests.list", PoolError::Closed)));

        let quests = Quests::new(Arc::new(repo));
        assert!(!quests.delete(QuestId::new(3)).await);
        assert!(quests.list().await.is_empty());
    }
}
