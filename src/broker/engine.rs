//! Broker engine
//!
//! This module contains the in-memory relay responsible for:
//! - appending published messages to the bounded message log
//! - resolving poll requests to per-client sessions
//! - computing each poll's batch and advancing the client's cursor
//! - counting degraded cases (dropped publishes, rejected identities)
//!
//! Concurrency and usage notes:
//! - The public API here is synchronous and designed to be held behind a
//!   lock (`SharedBroker`) by the transport layer. Each publish or poll takes
//!   the lock once, so a poll reads the log length and the client's cursor as a
//!   consistent pair and uses that same length for the cursor update.
//! - Callers should release the lock before doing network I/O.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::broker::message::MessageLog;
use crate::broker::session::ClientRegistry;
use crate::config::RelaySettings;
use crate::params::bounded;
use crate::utils::error::RelayError;

/// The broker as shared between request handlers.
pub type SharedBroker = Arc<Mutex<Broker>>;

/// Locks the shared broker, recovering the guard if a previous holder panicked.
pub fn lock(broker: &SharedBroker) -> MutexGuard<'_, Broker> {
    broker.lock().unwrap_or_else(PoisonError::into_inner)
}

/// What happened to a publish. Callers answer every outcome the same way; the
/// distinction exists for logging and counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Accepted { index: usize },
    EmptyMessage,
    LogFull,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    pub published: u64,
    pub dropped_empty: u64,
    pub dropped_full: u64,
    pub polls: u64,
    /// Messages handed out across all polls.
    pub delivered: u64,
    pub rejected_clients: u64,
}

#[derive(Debug)]
pub struct Broker {
    log: MessageLog,
    registry: ClientRegistry,
    max_message_len: usize,
    max_id_len: usize,
    stats: RelayStats,
}

impl Default for Broker {
    fn default() -> Self {
        Self::new(&RelaySettings::default())
    }
}

impl Broker {
    pub fn new(settings: &RelaySettings) -> Self {
        Self {
            log: MessageLog::with_capacity(settings.max_messages),
            registry: ClientRegistry::with_capacity(settings.max_clients),
            max_message_len: settings.max_message_len,
            max_id_len: settings.max_id_len,
            stats: RelayStats::default(),
        }
    }

    pub fn shared(settings: &RelaySettings) -> SharedBroker {
        Arc::new(Mutex::new(Self::new(settings)))
    }

    /// Appends a decoded message from `sender_id` to the log.
    ///
    /// Both values are cut to their configured length caps first. Empty text and
    /// a full log are silent no-ops apart from the returned outcome.
    pub fn publish(&mut self, sender_id: &str, text: &str) -> PublishOutcome {
        let sender_id = bounded(sender_id, self.max_id_len);
        let text = bounded(text, self.max_message_len);

        if text.is_empty() {
            self.stats.dropped_empty += 1;
            debug!(sender = %sender_id, "Ignoring empty message");
            return PublishOutcome::EmptyMessage;
        }
        if !self.log.append(sender_id.to_string(), text.to_string()) {
            self.stats.dropped_full += 1;
            warn!(
                sender = %sender_id,
                capacity = self.log.capacity(),
                "Message log is full, dropping message"
            );
            return PublishOutcome::LogFull;
        }

        self.stats.published += 1;
        let index = self.log.len() - 1;
        info!(index, from = %sender_id, content = %text, "New message");
        PublishOutcome::Accepted { index }
    }

    /// Returns every message `client_id` has not seen yet, excluding its own, as
    /// newline-terminated lines in publish order, and marks the whole log as seen.
    ///
    /// A first-time identity gets a new session starting at the beginning of the
    /// log. Fails only when that session cannot be created because the registry
    /// is full.
    pub fn poll(&mut self, client_id: &str) -> Result<String, RelayError> {
        let client_id = bounded(client_id, self.max_id_len);
        self.stats.polls += 1;

        let handle = match self.registry.resolve_or_create(client_id) {
            Ok(handle) => handle,
            Err(e) => {
                self.stats.rejected_clients += 1;
                warn!(client = %client_id, error = %e, "Rejecting poll from new client");
                return Err(e);
            }
        };

        let end = self.log.len();
        let cursor = self.registry.cursor(handle);

        let mut batch = String::new();
        let mut delivered = 0u64;
        for message in self.log.slice(cursor) {
            if message.sender_id == client_id {
                continue;
            }
            batch.push_str(&message.text);
            batch.push('\n');
            delivered += 1;
        }

        self.registry.advance(handle, end);
        self.stats.delivered += delivered;
        debug!(client = %client_id, from = cursor, to = end, delivered, "Poll served");

        Ok(batch)
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn registry(&self) -> &ClientRegistry {
        &self.registry
    }

    pub fn stats(&self) -> RelayStats {
        self.stats
    }
}
