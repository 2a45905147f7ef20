//! Host event dispatch.

use std::sync::Arc;

use questline_domain::{ActorId, HeldItem, RewardItem};
use questline_shared::{ChatDisposition, HeldItemData, HostEvent};

use super::commands::CommandRouter;
use crate::use_cases::{EnsureProfile, QuestAuthoring};

/// Routes each host event to the use case that owns it.
pub struct EventDispatcher {
    profiles: Arc<EnsureProfile>,
    authoring: Arc<QuestAuthoring>,
    commands: Arc<CommandRouter>,
}

impl EventDispatcher {
    pub fn new(
        profiles: Arc<EnsureProfile>,
        authoring: Arc<QuestAuthoring>,
        commands: Arc<CommandRouter>,
    ) -> Self {
        Self {
            profiles,
            authoring,
            commands,
        }
    }

    /// Handle one event. Chat messages yield the routing decision for the host.
    pub async fn dispatch(&self, event: HostEvent) -> Option<ChatDisposition> {
        let actor = ActorId::from_uuid(event.actor_id());

        match event {
            HostEvent::ChatMessage {
                text, held_item, ..
            } => {
                self.profiles.execute(actor).await;
                let held = held_item.map(held_item_from_wire);
                Some(self.authoring.handle_chat(actor, &text, held).await)
            }
            HostEvent::Command { args, .. } => {
                self.profiles.execute(actor).await;
                self.commands.execute(actor, &args).await;
                None
            }
            HostEvent::ActorJoined { .. } => {
                tracing::debug!(actor_id = %actor, "Actor joined");
                self.profiles.execute(actor).await;
                None
            }
            HostEvent::ActorLeft { .. } => {
                tracing::debug!(actor_id = %actor, "Actor left");
                self.authoring.end_session(actor);
                None
            }
        }
    }
}

fn held_item_from_wire(data: HeldItemData) -> HeldItem {
    HeldItem::new(data.material, data.amount, RewardItem::from_bytes(data.payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::entities::{Messenger, Quests, Users};
    use crate::infrastructure::catalog::MessageCatalog;
    use crate::infrastructure::outbound::ChannelNotifier;
    use crate::infrastructure::ports::{MockQuestRepo, MockUserRepo};
    use crate::use_cases::quest_authoring::SessionTable;
    use questline_domain::UserProfile;
    use uuid::Uuid;

    fn dispatcher(user_repo: MockUserRepo) -> (EventDispatcher, Arc<QuestAuthoring>) {
        let (notifier, _outbox) = ChannelNotifier::channel();
        let users = Arc::new(Users::new(Arc::new(user_repo)));
        let quests = Arc::new(Quests::new(Arc::new(MockQuestRepo::new())));
        let messenger = Arc::new(Messenger::new(
            Arc::new(notifier),
            Arc::new(MessageCatalog::default()),
            users.clone(),
        ));
        let authoring = Arc::new(QuestAuthoring::new(
            Arc::new(SessionTable::new(Duration::from_secs(60))),
            quests.clone(),
            messenger.clone(),
        ));
        let commands = Arc::new(CommandRouter::new(authoring.clone(), quests, messenger));
        let profiles = Arc::new(EnsureProfile::new(users, "en_US"));
        (
            EventDispatcher::new(profiles, authoring.clone(), commands),
            authoring,
        )
    }

    fn known_user_repo() -> MockUserRepo {
        let mut repo = MockUserRepo::new();
        repo.expect_get()
            .returning(|id| Ok(Some(UserProfile::new(id, "en_US"))));
        repo
    }

    #[tokio::test]
    async fn join_creates_missing_profile() {
        let mut repo = MockUserRepo::new();
        repo.expect_get().returning(|_| Ok(None));
        repo.expect_create().times(1).returning(|_| Ok(true));
        let (dispatcher, _) = dispatcher(repo);

        let routed = dispatcher
            .dispatch(HostEvent::ActorJoined {
                actor_id: Uuid::new_v4(),
            })
            .await;
        assert_eq!(routed, None);
    }

    #[tokio::test]
    async fn chat_without_session_passes_through() {
        let (dispatcher, _) = dispatcher(known_user_repo());
        let routed = dispatcher
            .dispatch(HostEvent::ChatMessage {
                actor_id: Uuid::new_v4(),
                text: "hello".into(),
                held_item: None,
            })
            .await;
        assert_eq!(routed, Some(ChatDisposition::PassThrough));
    }

    #[tokio::test]
    async fn command_then_chat_is_intercepted() {
        let (dispatcher, authoring) = dispatcher(known_user_repo());
        let actor_id = Uuid::new_v4();

        dispatcher
            .dispatch(HostEvent::Command {
                actor_id,
                args: vec!["create".into()],
            })
            .await;
        let routed = dispatcher
            .dispatch(HostEvent::ChatMessage {
                actor_id,
                text: "Defeat the Dragon".into(),
                held_item: None,
            })
            .await;

        assert_eq!(routed, Some(ChatDisposition::Intercepted));
        assert!(authoring.has_session(ActorId::from_uuid(actor_id)));
    }

    #[tokio::test]
    async fn leave_drops_open_session() {
        let (dispatcher, authoring) = dispatcher(known_user_repo());
        let actor_id = Uuid::new_v4();

        dispatcher
            .dispatch(HostEvent::Command {
                actor_id,
                args: vec!["create".into()],
            })
            .await;
        dispatcher.dispatch(HostEvent::ActorLeft { actor_id }).await;

        assert!(!authoring.has_session(ActorId::from_uuid(actor_id)));
    }

    #[test]
    fn held_item_maps_payload() {
        let held = held_item_from_wire(HeldItemData {
            material: "diamond".into(),
            amount: 3,
            payload: vec![9, 8, 7],
        });
        assert_eq!(held.amount, 3);
        assert_eq!(held.payload.as_bytes(), &[9, 8, 7]);
    }
}
