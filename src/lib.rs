//! # Pollcast
//!
//! `pollcast` is a minimal, in-memory broadcast relay built with Rust.
//! Clients post short text messages over HTTP and fetch, by polling, every
//! message they have not seen yet. A client never gets its own messages back.
//!
//! ## Core Modules
//!
//! - `broker`: the message log, the client registry and the delivery engine.
//! - `client`: a small HTTP client for talking to a running relay.
//! - `config`: loading server and relay settings.
//! - `params`: form/query-string parameter decoding.
//! - `transport`: the HTTP server and request parsing.
//! - `utils`: error types and logging setup.

pub mod broker;
pub mod client;
pub mod config;
pub mod params;
pub mod transport;
pub mod utils;

#[cfg(test)]
mod tests;
