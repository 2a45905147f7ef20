//! Domain entities.

mod quest;
mod user_profile;

pub use quest::{Quest, QuestDraft};
pub use user_profile::UserProfile;
