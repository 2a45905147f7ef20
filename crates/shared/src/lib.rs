//! Questline Protocol - Wire types exchanged with the host runtime
//!
//! The host delivers [`HostEvent`]s (chat, commands, joins, leaves) and
//! receives [`OutboundMessage`]s (notifications and chat dispositions).
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json and uuid
//! 2. **No business logic** - Pure data types and serialization
//! 3. **No domain IDs** - use raw `uuid::Uuid` in DTOs

pub mod messages;

pub use messages::{ChatDisposition, HeldItemData, HostEvent, OutboundMessage};
