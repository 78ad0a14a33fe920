//! The `transport` module is responsible for handling network communication
//! with clients over HTTP.
//!
//! It turns publish form bodies and poll query strings into broker calls and
//! implements the HTTP server itself.

pub mod http;
pub mod message;

pub use http::{build_router, start_http_server};
