//! Questline Engine library.
//!
//! Persists quests and user profiles for an event-driven host and runs the
//! chat-driven quest authoring workflow.
//!
//! ## Structure
//!
//! - `entities/` - Persistence façades and actor messaging
//! - `use_cases/` - User story orchestration across entities
//! - `infrastructure/` - Connection pool, SQLite repositories, catalogs (ports + adapters)
//! - `api/` - Host event and command entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod config;
pub mod entities;
pub mod infrastructure;
pub mod use_cases;

/// End-to-end tests against a temp-file SQLite store.
#[cfg(test)]
mod e2e_tests;

pub use app::{App, StartupError};
pub use config::AppConfig;
