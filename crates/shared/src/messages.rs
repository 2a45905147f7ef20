//! Host boundary message types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Inbound (host -> engine)
// =============================================================================

/// Events delivered by the host runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostEvent {
    /// Actor typed free text into chat
    ChatMessage {
        actor_id: Uuid,
        text: String,
        /// What the actor was holding when the message was sent
        #[serde(default)]
        held_item: Option<HeldItemData>,
    },
    /// Actor ran the quests command, e.g. `/quests create`
    Command {
        actor_id: Uuid,
        #[serde(default)]
        args: Vec<String>,
    },
    /// Actor connected to the host
    ActorJoined { actor_id: Uuid },
    /// Actor disconnected from the host
    ActorLeft { actor_id: Uuid },
}

impl HostEvent {
    pub fn actor_id(&self) -> Uuid {
        match self {
            Self::ChatMessage { actor_id, .. }
            | Self::Command { actor_id, .. }
            | Self::ActorJoined { actor_id }
            | Self::ActorLeft { actor_id } => *actor_id,
        }
    }
}

/// Held item snapshot as serialized by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldItemData {
    pub material: String,
    #[serde(default = "default_amount")]
    pub amount: u32,
    /// Host-serialized item bytes
    #[serde(default)]
    pub payload: Vec<u8>,
}

fn default_amount() -> u32 {
    1
}

// =============================================================================
// Outbound (engine -> host)
// =============================================================================

/// Whether a chat message should still reach its normal destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatDisposition {
    /// Consumed by the engine; the host must not deliver it
    Intercepted,
    /// Not ours; deliver normally
    PassThrough,
}

/// Messages emitted to the host runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutboundMessage {
    /// Plain text notification for one actor
    Notify { actor_id: Uuid, text: String },
    /// Routing decision for the chat message just received
    ChatRouted {
        actor_id: Uuid,
        disposition: ChatDisposition,
    },
}
