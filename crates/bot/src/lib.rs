//! Bot runner
//!
//! Turns transport events into flow calls: the [`Router`] classifies each
//! inbound event and hands it to the right dialog, serializing events per
//! chat so concurrent updates cannot race a session. The [`console`] module
//! provides a line-based transport for local runs.

pub mod console;
pub mod router;

pub use console::ConsoleTransport;
pub use router::Router;
