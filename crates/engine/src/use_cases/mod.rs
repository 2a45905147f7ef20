//! Use cases - User story orchestration.
//!
//! Use cases orchestrate across entity modules to fulfill user stories.

pub mod profile;
pub mod quest_authoring;

pub use profile::EnsureProfile;
pub use quest_authoring::QuestAuthoring;
