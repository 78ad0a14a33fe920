//! Decoded request types.
//!
//! The relay only looks at two things on the wire: the form body of a publish and
//! the query string of a poll. Both are parsed here into plain text.

use crate::params::{decode, extract, lookup};

/// Identity used for a poll that names no `client_id`.
pub const DEFAULT_CLIENT_ID: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub client_id: String,
    pub message: String,
}

impl PublishRequest {
    /// Parses a `message=…&client_id=…` form body. Missing fields decode to
    /// empty text.
    pub fn from_form(body: &str) -> Self {
        Self {
            client_id: decode(extract(body, "client_id")),
            message: decode(extract(body, "message")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollRequest {
    pub client_id: String,
}

impl PollRequest {
    /// Reads `client_id` from the query string, falling back to
    /// [`DEFAULT_CLIENT_ID`] when the query or the parameter is absent.
    pub fn from_query(query: Option<&str>) -> Self {
        let client_id = query
            .and_then(|q| lookup(q, "client_id"))
            .map(decode)
            .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string());
        Self { client_id }
    }
}
