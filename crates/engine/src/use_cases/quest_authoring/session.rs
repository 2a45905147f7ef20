//! Per-actor authoring sessions.
//!
//! A session walks one actor through the four input steps. Transitions are
//! synchronous and side-effect free; the caller decides what to send and when
//! to persist.

use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use questline_domain::{ActorId, QuestDraft, QuestName, RewardCoins};

use crate::infrastructure::catalog::keys;

/// Idle time after which an open session is discarded.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthoringStep {
    AwaitingName,
    AwaitingDescription,
    AwaitingCoins,
    AwaitingItemDecision,
}

impl AuthoringStep {
    /// 1-based position in the workflow.
    pub fn index(self) -> u8 {
        match self {
            Self::AwaitingName => 1,
            Self::AwaitingDescription => 2,
            Self::AwaitingCoins => 3,
            Self::AwaitingItemDecision => 4,
        }
    }

    pub fn prompt_key(self) -> &'static str {
        match self {
            Self::AwaitingName => keys::INPUT_QUEST_NAME,
            Self::AwaitingDescription => keys::INPUT_QUEST_DESCRIPTION,
            Self::AwaitingCoins => keys::INPUT_QUEST_COINS,
            Self::AwaitingItemDecision => keys::INPUT_QUEST_ITEM,
        }
    }
}

/// What the caller should do after feeding one message to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Input accepted; send the prompt for the next step.
    Prompt(&'static str),
    /// Input rejected; send the message and stay on the same step.
    Reprompt(&'static str),
    /// Last answer accepted; the draft is ready to persist.
    Finish { attach_item: bool },
}

#[derive(Debug, Clone)]
pub struct AuthoringSession {
    draft: QuestDraft,
    step: AuthoringStep,
    last_activity: Instant,
}

impl AuthoringSession {
    pub fn new() -> Self {
        Self {
            draft: QuestDraft::new(),
            step: AuthoringStep::AwaitingName,
            last_activity: Instant::now(),
        }
    }

    pub fn step(&self) -> AuthoringStep {
        self.step
    }

    pub fn draft(&self) -> &QuestDraft {
        &self.draft
    }

    pub fn into_draft(self) -> QuestDraft {
        self.draft
    }

    fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_activity)
    }

    pub fn advance(&mut self, text: &str) -> Advance {
        self.last_activity = Instant::now();

        match self.step {
            AuthoringStep::AwaitingName => match QuestName::new(text) {
                Ok(name) => {
                    self.draft.name = Some(name);
                    self.step = AuthoringStep::AwaitingDescription;
                    Advance::Prompt(self.step.prompt_key())
                }
                Err(_) if text.trim().is_empty() => Advance::Reprompt(keys::INVALID_QUEST_NAME),
                Err(_) => Advance::Reprompt(keys::INVALID_QUEST_NAME_LENGTH),
            },
            AuthoringStep::AwaitingDescription => {
                self.draft.description = Some(text.to_string());
                self.step = AuthoringStep::AwaitingCoins;
                Advance::Prompt(self.step.prompt_key())
            }
            AuthoringStep::AwaitingCoins => match RewardCoins::parse(text) {
                Ok(coins) => {
                    self.draft.reward_coins = Some(coins);
                    self.step = AuthoringStep::AwaitingItemDecision;
                    Advance::Prompt(self.step.prompt_key())
                }
                Err(_) => Advance::Reprompt(keys::INVALID_QUEST_COINS),
            },
            AuthoringStep::AwaitingItemDecision => match parse_decision(text) {
                Some(attach_item) => Advance::Finish { attach_item },
                None => Advance::Reprompt(keys::INVALID_QUEST_ITEM),
            },
        }
    }
}

impl Default for AuthoringSession {
    fn default() -> Self {
        Self::new()
    }
}

/// `true`/`yes` or `false`/`no`, any case.
pub fn parse_decision(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" => Some(true),
        "false" | "no" => Some(false),
        _ => None,
    }
}

/// Open sessions keyed by actor.
///
/// Safe for concurrent use across actors. Methods never hand out a map
/// guard, so no shard lock can be held across an `.await`.
#[derive(Debug)]
pub struct SessionTable {
    sessions: DashMap<ActorId, AuthoringSession>,
    ttl: Duration,
}

impl SessionTable {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Open a fresh session. `false` if the actor already has one.
    pub fn open(&self, actor: ActorId) -> bool {
        match self.sessions.entry(actor) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(AuthoringSession::new());
                true
            }
        }
    }

    pub fn contains(&self, actor: ActorId) -> bool {
        self.sessions.contains_key(&actor)
    }

    pub fn step(&self, actor: ActorId) -> Option<AuthoringStep> {
        self.sessions.get(&actor).map(|session| session.step())
    }

    /// Whether the actor's session has been idle longer than the TTL.
    pub fn is_expired(&self, actor: ActorId) -> bool {
        let now = Instant::now();
        self.sessions
            .get(&actor)
            .is_some_and(|session| session.idle_for(now) > self.ttl)
    }

    /// Feed one message to the actor's session. `None` when there is no session.
    pub fn advance(&self, actor: ActorId, text: &str) -> Option<Advance> {
        self.sessions
            .get_mut(&actor)
            .map(|mut session| session.advance(text))
    }

    pub fn remove(&self, actor: ActorId) -> Option<AuthoringSession> {
        self.sessions.remove(&actor).map(|(_, session)| session)
    }

    /// Drop every session idle longer than the TTL and return their actors.
    pub fn expire_idle(&self) -> Vec<ActorId> {
        let now = Instant::now();
        let mut expired = Vec::new();
        self.sessions.retain(|actor, session| {
            let keep = session.idle_for(now) <= self.ttl;
            if !keep {
                expired.push(*actor);
            }
            keep
        });
        expired
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Pretend the actor's session went quiet `by` ago.
    #[cfg(test)]
    pub(crate) fn backdate(&self, actor: ActorId, by: Duration) {
        if let Some(mut session) = self.sessions.get_mut(&actor) {
            session.last_activity = Instant::now()
                .checked_sub(by)
                .expect("backdate within monotonic clock range");
        }
    }
}

impl Default for SessionTable {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}
