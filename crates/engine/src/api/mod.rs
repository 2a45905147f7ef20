//! API layer - host event entry points.

pub mod commands;
pub mod dispatch;
pub mod host_stream;
pub mod lanes;

pub use commands::{Command, CommandRouter};
pub use dispatch::EventDispatcher;
pub use host_stream::HostEventReader;
pub use lanes::ActorLanes;
