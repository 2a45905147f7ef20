//! Quest authoring use case.
//!
//! Drives an actor's session from the `create` command to the final store
//! write. Every chat message from an actor with an open session is consumed
//! here and answered with exactly one notification.

use std::sync::Arc;

use questline_domain::{ActorId, HeldItem};
use questline_shared::ChatDisposition;

use super::session::{Advance, AuthoringStep, SessionTable};
use crate::entities::{Messenger, Quests};
use crate::infrastructure::catalog::keys;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// The actor already has an open session; it was left untouched.
    AlreadyInProgress,
}

pub struct QuestAuthoring {
    sessions: Arc<SessionTable>,
    quests: Arc<Quests>,
    messenger: Arc<Messenger>,
}

impl QuestAuthoring {
    pub fn new(sessions: Arc<SessionTable>, quests: Arc<Quests>, messenger: Arc<Messenger>) -> Self {
        Self {
            sessions,
            quests,
            messenger,
        }
    }

    /// Open a session and ask for the quest name.
    pub async fn start(&self, actor: ActorId) -> StartOutcome {
        if !self.sessions.open(actor) {
            self.messenger
                .send(actor, keys::QUEST_CREATION_IN_PROGRESS)
                .await;
            return StartOutcome::AlreadyInProgress;
        }

        tracing::info!(actor_id = %actor, "Quest authoring started");
        self.messenger
            .send(actor, AuthoringStep::AwaitingName.prompt_key())
            .await;
        StartOutcome::Started
    }

    /// Route one chat message.
    ///
    /// `held` is what the actor was holding when the message was sent; it is
    /// only read when the final answer asks for the item reward.
    pub async fn handle_chat(
        &self,
        actor: ActorId,
        text: &str,
        held: Option<HeldItem>,
    ) -> ChatDisposition {
        if !self.sessions.contains(actor) {
            return ChatDisposition::PassThrough;
        }

        if self.sessions.is_expired(actor) {
            self.sessions.remove(actor);
            tracing::info!(actor_id = %actor, "Quest authoring session expired");
            self.messenger.send(actor, keys::SESSION_EXPIRED).await;
            return ChatDisposition::PassThrough;
        }

        // Session closed between the checks above (cancel, disconnect, sweep).
        let Some(advance) = self.sessions.advance(actor, text) else {
            return ChatDisposition::PassThrough;
        };

        match advance {
            Advance::Prompt(key) => {
                tracing::debug!(actor_id = %actor, step = ?self.sessions.step(actor), "Authoring step accepted");
                self.messenger.send(actor, key).await;
            }
            Advance::Reprompt(key) => {
                tracing::debug!(actor_id = %actor, "Authoring input rejected");
                self.messenger.send(actor, key).await;
            }
            Advance::Finish { attach_item } => self.finish(actor, attach_item, held).await,
        }

        ChatDisposition::Intercepted
    }

    async fn finish(&self, actor: ActorId, attach_item: bool, held: Option<HeldItem>) {
        // Removed before the write so a slow store cannot see a second finish.
        let Some(session) = self.sessions.remove(actor) else {
            return;
        };

        let mut draft = session.into_draft();
        if attach_item {
            draft.reward_item = held.and_then(HeldItem::into_reward);
            if draft.reward_item.is_none() {
                tracing::debug!(actor_id = %actor, "No item held; quest has no item reward");
            }
        }

        let saved = match draft.build() {
            Ok(quest) => {
                let saved = self.quests.create(&quest).await;
                tracing::info!(actor_id = %actor, quest_name = %quest.name, saved, "Quest authoring finished");
                saved
            }
            Err(e) => {
                tracing::error!(actor_id = %actor, error = %e, "Quest draft incomplete at final step");
                false
            }
        };

        let key = if saved {
            keys::QUEST_CREATION_SUCCESS
        } else {
            keys::QUEST_CREATION_FAILED
        };
        self.messenger.send(actor, key).await;
    }

    /// Abandon the actor's session at their request.
    pub async fn cancel(&self, actor: ActorId) -> bool {
        if self.sessions.remove(actor).is_some() {
            tracing::info!(actor_id = %actor, "Quest authoring cancelled");
            self.messenger.send(actor, keys::QUEST_CREATION_CANCELLED).await;
            true
        } else {
            self.messenger.send(actor, keys::NO_QUEST_IN_PROGRESS).await;
            false
        }
    }

    /// Drop the actor's session silently (disconnect).
    pub fn end_session(&self, actor: ActorId) -> bool {
        let ended = self.sessions.remove(actor).is_some();
        if ended {
            tracing::debug!(actor_id = %actor, "Quest authoring session dropped on disconnect");
        }
        ended
    }

    /// Discard idle sessions and tell their actors. Returns how many expired.
    pub async fn expire_idle(&self) -> usize {
        let expired = self.sessions.expire_idle();
        for actor in &expired {
            tracing::info!(actor_id = %actor, "Quest authoring session expired");
            self.messenger.send(*actor, keys::SESSION_EXPIRED).await;
        }
        expired.len()
    }

    pub fn has_session(&self, actor: ActorId) -> bool {
        self.sessions.contains(actor)
    }

    pub fn current_step(&self, actor: ActorId) -> Option<AuthoringStep> {
        self.sessions.step(actor)
    }
}
