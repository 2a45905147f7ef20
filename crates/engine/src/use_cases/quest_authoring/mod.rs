//! Quest authoring - multi-turn quest creation over chat.

mod authoring;
mod session;

pub use authoring::{QuestAuthoring, StartOutcome};
pub use session::{
    parse_decision, Advance, AuthoringSession, AuthoringStep, SessionTable, DEFAULT_SESSION_TTL,
};
