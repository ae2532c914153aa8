//! Error types shared across the pricing assistant

use thiserror::Error;

/// Errors raised by the persistence and delivery layers.
///
/// Per-chat failures are contained to that chat: callers re-prompt, redirect
/// to the main menu or log, but never terminate the process. Bad user input
/// is not an error at all, the flows re-prompt without one.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O or serialization failure in the configuration store.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Delivery request failed; retry policy belongs to the transport.
    #[error("transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, Error>;
