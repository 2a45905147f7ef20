//! Text-safe codec for opaque reward item payloads.
//!
//! The bytes are produced by the host's item serializer and never inspected
//! here; they are only wrapped in standard base64 so they fit a TEXT column.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use questline_domain::RewardItem;

pub fn encode(item: &RewardItem) -> String {
    STANDARD.encode(item.as_bytes())
}

/// Decode a stored payload. Unreadable text degrades to `None` with a warning.
///
/// Absence is a NULL column, so empty text is an empty payload.
pub fn decode(text: &str) -> Option<RewardItem> {
    match STANDARD.decode(text.trim()) {
        Ok(bytes) => Some(RewardItem::from_bytes(bytes)),
        Err(e) => {
            tracing::warn!(error = %e, "Discarding undecodable reward item payload");
            None
        }
    }
}
