//! Core types and traits for the pricing assistant
//!
//! This crate provides foundational types used across all other crates:
//! - Chat identifiers and inbound/outbound event types
//! - Per-chat session data (user estimate dialog, admin dialog)
//! - Country and delivery types
//! - Error types
//! - The `ChatTransport` trait implemented by the message delivery layer

pub mod chat;
pub mod country;
pub mod error;
pub mod session;
pub mod traits;

pub use chat::{
    Button, ButtonAction, ChatId, Command, InboundEvent, Keyboard, MessageId, OutboundMessage,
    UserId,
};
pub use country::CountryCode;
pub use error::{Error, Result};
pub use session::{AdminSession, DeliveryKind, UserSession, UserStep};
pub use traits::ChatTransport;
