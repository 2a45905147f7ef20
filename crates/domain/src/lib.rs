pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{Quest, QuestDraft, UserProfile};
pub use error::DomainError;
pub use ids::{ActorId, QuestId};
pub use value_objects::{HeldItem, QuestName, RewardCoins, RewardItem, DEFAULT_LOCALE};
