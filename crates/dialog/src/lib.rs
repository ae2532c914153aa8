//! Conversation flows
//!
//! The two per-chat dialogs of the assistant: the price-estimate flow any
//! user can run and the password-gated admin flow. Both are driven by the
//! router one event at a time and keep their state in the [`SessionStore`];
//! rendering of every outbound message lives in [`render`].

pub mod admin;
pub mod render;
pub mod store;
pub mod user;

pub use admin::AdminFlow;
pub use store::SessionStore;
pub use user::UserFlow;
