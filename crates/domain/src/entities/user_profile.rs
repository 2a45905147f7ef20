//! User profile entity - per-actor balance and locale.

use serde::{Deserialize, Serialize};

use crate::ids::ActorId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Primary key; immutable once created
    pub id: ActorId,
    pub balance: i64,
    pub locale: String,
}

impl UserProfile {
    /// A fresh profile with a zero balance.
    pub fn new(id: ActorId, locale: impl Into<String>) -> Self {
        Self {
            id,
            balance: 0,
            locale: locale.into(),
        }
    }

    pub fn with_balance(mut self, balance: i64) -> Self {
        self.balance = balance;
        self
    }
}
