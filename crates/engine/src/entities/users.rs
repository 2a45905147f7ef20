//! User profile façade.

use std::sync::Arc;

use questline_domain::{ActorId, UserProfile};

use super::report_failure;
use crate::infrastructure::ports::UserRepo;

pub struct Users {
    repo: Arc<dyn UserRepo>,
}

impl Users {
    pub fn new(repo: Arc<dyn UserRepo>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, profile: &UserProfile) -> bool {
        match self.repo.create(profile).await {
            Ok(written) => written,
            Err(e) => {
                report_failure("users.create", &e);
                false
            }
        }
    }

    pub async fn get(&self, id: ActorId) -> Option<UserProfile> {
        match self.repo.get(id).await {
            Ok(profile) => profile,
            Err(e) => {
                report_failure("users.get", &e);
                None
            }
        }
    }

    pub async fn update(&self, profile: &UserProfile) -> bool {
        match self.repo.update(profile).await {
            Ok(updated) => updated,
            Err(e) => {
                report_failure("users.update", &e);
                false
            }
        }
    }

    pub async fn delete(&self, id: ActorId) -> bool {
        match self.repo.delete(id).await {
            Ok(deleted) => deleted,
            Err(e) => {
                report_failure("users.delete", &e);
                false
            }
        }
    }

    pub async fn list(&self) -> Vec<UserProfile> {
        match self.repo.list().await {
            Ok(profiles) => profiles,
            Err(e) => {
                report_failure("users.list", &e);
                Vec::new()
            }
        }
    }

    /// Existing profile for `id`, or a fresh one stored with `default_locale`.
    ///
    /// A failed lookup does not fall through to create; the store may simply
    /// be unreachable. Returns `None` whenever the profile could not be
    /// read or written.
    pub async fn get_or_create(&self, id: ActorId, default_locale: &str) -> Option<UserProfile> {
        match self.repo.get(id).await {
            Ok(Some(profile)) => return Some(profile),
            Ok(None) => {}
            Err(e) => {
                report_failure("users.get", &e);
                return None;
            }
        }

        let profile = UserProfile::new(id, default_locale);
        if self.create(&profile).await {
            tracing::info!(actor_id = %id, locale = default_locale, "Created user profile");
            Some(profile)
        } else {
            None
        }
    }
}
