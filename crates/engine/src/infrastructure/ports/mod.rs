//! Port traits for infrastructure boundaries.
//!
//! Apart from the pool's connection factory these are the only abstractions
//! in the engine. Everything else is concrete types. Ports exist for:
//! - Record storage (could swap SQLite -> MySQL/Postgres)
//! - Outbound notifications to actors (stdout today, host bridge tomorrow)

mod error;
mod external;
mod repos;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{QuestRepo, UserRepo};

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::NotifierPort;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockQuestRepo, MockUserRepo};

#[cfg(test)]
pub use external::MockNotifierPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::{ContractViolation, NotifyError, RepoError};
