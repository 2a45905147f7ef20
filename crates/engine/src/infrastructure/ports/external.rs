//! External service port traits.

use async_trait::async_trait;
use questline_domain::ActorId;

use super::error::NotifyError;

/// Delivers plain text to one actor through the host's messaging layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotifierPort: Send + Sync {
    async fn notify(&self, actor_id: ActorId, text: String) -> Result<(), NotifyError>;
}
