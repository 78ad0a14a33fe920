//! The `client` module provides a small HTTP client for the relay, used by the
//! `publish` and `poll` CLI subcommands and by the end-to-end tests.

pub mod pubsub_client;
pub use pubsub_client::{RelayClient, generate_client_id};
