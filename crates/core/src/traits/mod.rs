//! Traits implemented by external collaborators

pub mod transport;

pub use transport::ChatTransport;
