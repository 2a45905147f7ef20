//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod catalog;
pub mod outbound;
pub mod payload;
pub mod pool;
pub mod ports;
pub mod sqlite;
