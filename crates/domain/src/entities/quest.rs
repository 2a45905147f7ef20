//! Quest entity - an authored task with a coin and optional item reward.
//!
//! A `Quest` is always fully specified; partially collected input lives in a
//! [`QuestDraft`] until every required field is present.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::QuestId;
use crate::value_objects::{QuestName, RewardCoins, RewardItem};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    /// Store-assigned identity; `None` until the quest has been persisted
    pub id: Option<QuestId>,
    pub name: QuestName,
    pub description: String,
    pub reward_coins: RewardCoins,
    /// `None` means no item reward
    pub reward_item: Option<RewardItem>,
}

impl Quest {
    pub fn new(name: QuestName, description: impl Into<String>, reward_coins: RewardCoins) -> Self {
        Self {
            id: None,
            name,
            description: description.into(),
            reward_coins,
            reward_item: None,
        }
    }

    pub fn with_id(mut self, id: QuestId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_reward_item(mut self, item: RewardItem) -> Self {
        self.reward_item = Some(item);
        self
    }

    /// Same content, ignoring store identity.
    pub fn same_content(&self, other: &Quest) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.reward_coins == other.reward_coins
            && self.reward_item == other.reward_item
    }
}

/// In-progress quest assembled one field at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestDraft {
    pub name: Option<QuestName>,
    pub description: Option<String>,
    pub reward_coins: Option<RewardCoins>,
    pub reward_item: Option<RewardItem>,
}

impl QuestDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble the final quest.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the first missing field.
    pub fn build(self) -> Result<Quest, DomainError> {
        let name = self
            .name
            .ok_or_else(|| DomainError::validation("Quest draft is missing a name"))?;
        let description = self
            .description
            .ok_or_else(|| DomainError::validation("Quest draft is missing a description"))?;
        let reward_coins = self
            .reward_coins
            .ok_or_else(|| DomainError::validation("Quest draft is missing reward coins"))?;
        Ok(Quest {
            id: None,
            name,
            description,
            reward_coins,
            reward_item: self.reward_item,
        })
    }
}
