//! SQLite-backed record storage.
//!
//! Repositories borrow a connection from the shared [`StorePool`] for each
//! operation and return it when the guard drops.

mod connector;
mod quest_repo;
mod schema;
mod user_repo;

pub use connector::{SqliteConnector, StorePool};
pub use quest_repo::SqliteQuestRepo;
pub use schema::ensure_schema;
pub use user_repo::SqliteUserRepo;
