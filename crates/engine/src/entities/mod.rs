//! Entity modules - persistence façade and actor messaging.
//!
//! The façades wrap repository ports and fold every store failure into an
//! "empty" result (`false`, `None`, empty `Vec`) after logging it. Callers
//! above this layer never see `RepoError`.

pub mod messenger;
pub mod quests;
pub mod users;

pub use messenger::Messenger;
pub use quests::Quests;
pub use users::Users;

use std::sync::Arc;

use crate::infrastructure::ports::RepoError;

/// Both façades, composed once at startup.
#[derive(Clone)]
pub struct Persistence {
    pub quests: Arc<Quests>,
    pub users: Arc<Users>,
}

/// Log a store failure with its class and message.
pub(crate) fn report_failure(operation: &'static str, error: &RepoError) {
    tracing::error!(
        operation,
        error_class = error.class(),
        error = %error,
        "Persistence operation failed"
    );
}
