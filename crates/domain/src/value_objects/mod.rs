//! Value objects for quest records.

mod names;
mod reward;

pub use names::QuestName;
pub use reward::{HeldItem, RewardCoins, RewardItem};

/// Locale assigned to new user profiles when the host does not supply one.
pub const DEFAULT_LOCALE: &str = "en_US";
