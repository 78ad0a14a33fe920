//! Error types for the relay core, the HTTP server and the smoke-test client.
//!
//! The core only fails in one way: a brand-new identity polling while the client
//! registry is full. Everything else it absorbs as a documented no-op.

use std::io;

use thiserror::Error;

/// Errors surfaced by the relay core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// A new identity polled while every session slot was taken.
    #[error("client registry is full ({capacity} sessions)")]
    RegistryFull { capacity: usize },
}

/// Fatal errors while starting or running the HTTP server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] io::Error),
}

/// Errors returned by [`crate::client::RelayClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("relay answered with status {0}")]
    Status(reqwest::StatusCode),
}
