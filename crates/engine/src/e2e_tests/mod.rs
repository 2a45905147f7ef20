//! End-to-end tests.
//!
//! These tests drive the complete App against a temp-file SQLite store:
//! host events in, outbound messages out.

mod e2e_helpers;
mod quest_authoring_flow_tests;

pub use e2e_helpers::*;
