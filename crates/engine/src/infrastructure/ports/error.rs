//! Error types for port operations.

use crate::infrastructure::pool::PoolError;

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Statement failed in the store - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// No connection could be borrowed for the operation.
    #[error("Connection pool error in {operation}: {source}")]
    Pool {
        operation: &'static str,
        #[source]
        source: PoolError,
    },

    /// A stored row could not be turned back into a record.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The caller broke the operation's contract (e.g. updating an unsaved record).
    #[error("Contract violation: {0}")]
    ContractViolation(String),
}

impl RepoError {
    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Pool error with operation context.
    pub fn pool(operation: &'static str, source: PoolError) -> Self {
        Self::Pool { operation, source }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Create a ContractViolation error.
    pub fn contract(message: impl ToString) -> Self {
        Self::ContractViolation(message.to_string())
    }

    /// Short failure class for structured log lines.
    pub fn class(&self) -> &'static str {
        match self {
            Self::Database { .. } => "database",
            Self::Pool { .. } => "pool",
            Self::Serialization(_) => "serialization",
            Self::ContractViolation(_) => "contract",
        }
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::ContractViolation(_))
    }
}

/// Caller misuse surfaced through the persistence façade.
///
/// Unlike store failures this is never folded into a `false`/`None` result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Contract violation in {operation}: {message}")]
pub struct ContractViolation {
    pub operation: &'static str,
    pub message: String,
}

/// Outbound notification could not be handed to the host.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NotifyError {
    #[error("Outbound channel closed")]
    ChannelClosed,
}
