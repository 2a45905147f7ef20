//! Ensure-profile use case.
//!
//! Runs when an actor joins and whenever a command or chat message arrives
//! from an actor the store has not seen yet.

use std::sync::Arc;

use questline_domain::{ActorId, UserProfile};

use crate::entities::Users;

pub struct EnsureProfile {
    users: Arc<Users>,
    default_locale: String,
}

impl EnsureProfile {
    pub fn new(users: Arc<Users>, default_locale: impl Into<String>) -> Self {
        Self {
            users,
            default_locale: default_locale.into(),
        }
    }

    /// Look the actor's profile up, creating it with the default locale if absent.
    ///
    /// `None` when the store could not be read or written; the failure has
    /// already been logged.
    pub async fn execute(&self, actor: ActorId) -> Option<UserProfile> {
        let profile = self.users.get_or_create(actor, &self.default_locale).await;
        if profile.is_none() {
            tracing::warn!(actor_id = %actor, "No user profile available");
        }
        profile
    }
}
