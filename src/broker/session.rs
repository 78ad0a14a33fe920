//! Client sessions and the registry that owns them.
//!
//! A session is the delivery cursor of one client identity: the log index of the
//! next message that client has not seen. Sessions are created on first poll and
//! live as long as the process.
//!
//! Concurrency note: callers must synchronize access to the registry (the broker
//! lock does this).

use std::collections::HashMap;

use crate::utils::error::RelayError;

pub type ClientId = String;

/// Opaque reference to a session inside a [`ClientRegistry`].
///
/// Sessions are never removed, so a handle stays valid for the registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionHandle(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub client_id: ClientId,
    cursor: usize,
}

impl Session {
    fn new(client_id: ClientId) -> Self {
        Self {
            client_id,
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

#[derive(Debug)]
pub struct ClientRegistry {
    index: HashMap<ClientId, usize>,
    sessions: Vec<Session>,
    capacity: usize,
}

impl ClientRegistry {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::new(),
            sessions: Vec::new(),
            capacity,
        }
    }

    /// Returns the session for `client_id`, creating it with cursor 0 if this is
    /// the first time the identity is seen.
    ///
    /// A new identity is rejected with [`RelayError::RegistryFull`] once
    /// `capacity` sessions exist; known identities always resolve.
    pub fn resolve_or_create(&mut self, client_id: &str) -> Result<SessionHandle, RelayError> {
        if let Some(&idx) = self.index.get(client_id) {
            return Ok(SessionHandle(idx));
        }
        if self.sessions.len() >= self.capacity {
            return Err(RelayError::RegistryFull {
                capacity: self.capacity,
            });
        }

        let idx = self.sessions.len();
        self.sessions.push(Session::new(client_id.to_string()));
        self.index.insert(client_id.to_string(), idx);
        Ok(SessionHandle(idx))
    }

    pub fn cursor(&self, handle: SessionHandle) -> usize {
        self.sessions[handle.0].cursor
    }

    /// Moves the cursor forward to `to`. A smaller value leaves it unchanged.
    pub fn advance(&mut self, handle: SessionHandle, to: usize) {
        let session = &mut self.sessions[handle.0];
        session.cursor = session.cursor.max(to);
    }

    pub fn get(&self, client_id: &str) -> Option<&Session> {
        self.index.get(client_id).map(|&idx| &self.sessions[idx])
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
