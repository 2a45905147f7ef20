//! Localized notifications to actors.

use std::sync::Arc;

use questline_domain::ActorId;

use super::Users;
use crate::infrastructure::catalog::MessageCatalog;
use crate::infrastructure::ports::NotifierPort;

/// Looks up the actor's locale and sends catalog text through the notifier.
///
/// Delivery failures are logged; no caller needs to handle them.
pub struct Messenger {
    notifier: Arc<dyn NotifierPort>,
    catalog: Arc<MessageCatalog>,
    users: Arc<Users>,
}

impl Messenger {
    pub fn new(
        notifier: Arc<dyn NotifierPort>,
        catalog: Arc<MessageCatalog>,
        users: Arc<Users>,
    ) -> Self {
        Self {
            notifier,
            catalog,
            users,
        }
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// The actor's stored locale, or the catalog default when there is no profile.
    pub async fn locale_for(&self, actor_id: ActorId) -> String {
        self.users
            .get(actor_id)
            .await
            .map(|profile| profile.locale)
            .unwrap_or_else(|| self.catalog.default_locale().to_string())
    }

    pub async fn send(&self, actor_id: ActorId, key: &str) {
        let locale = self.locale_for(actor_id).await;
        let text = self.catalog.get(&locale, key);
        self.deliver(actor_id, text).await;
    }

    pub async fn send_rendered(&self, actor_id: ActorId, key: &str, args: &[(&str, &str)]) {
        let locale = self.locale_for(actor_id).await;
        let text = self.catalog.render(&locale, key, args);
        self.deliver(actor_id, text).await;
    }

    /// Send already-localized text.
    pub async fn deliver(&self, actor_id: ActorId, text: String) {
        if let Err(e) = self.notifier.notify(actor_id, text).await {
            tracing::warn!(actor_id = %actor_id, error = %e, "Failed to deliver notification");
        }
    }
}
