//! Client representation
//!
//! `RelayClient` talks to a running relay over HTTP: it posts form-encoded
//! messages and polls for new ones. Each call is a single request; the relay
//! closes the connection after every response.

use reqwest::Client;
use uuid::Uuid;

use crate::utils::error::ClientError;

/// Path polled by the client. The relay routes every path the same way.
const POLL_PATH: &str = "/receive";

/// Path messages are posted to.
const PUBLISH_PATH: &str = "/send";

/// A fresh identity for a client that did not pick one.
pub fn generate_client_id() -> String {
    format!("client-{}", Uuid::new_v4())
}

#[derive(Debug, Clone)]
pub struct RelayClient {
    base_url: String,
    http: Client,
}

impl RelayClient {
    /// Create a client for the relay at `base_url` (e.g. `http://127.0.0.1:8080`).
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Post `message` on behalf of `client_id`.
    pub async fn publish(&self, client_id: &str, message: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(format!("{}{PUBLISH_PATH}", self.base_url))
            .form(&[("message", message), ("client_id", client_id)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }
        Ok(())
    }

    /// Fetch every message `client_id` has not seen yet, one per line.
    pub async fn poll(&self, client_id: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .get(format!("{}{POLL_PATH}", self.base_url))
            .query(&[("client_id", client_id)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }
        Ok(response.text().await?)
    }
}
