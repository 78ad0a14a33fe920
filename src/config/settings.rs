use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for both the HTTP server and the relay core.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub relay: RelaySettings,
}

/// Configuration settings for the server.
///
/// Defines the host and port the server will bind to.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Capacity limits of the relay.
///
/// `max_messages` and `max_clients` bound the message log and the client registry;
/// the two length caps are in bytes of decoded text.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RelaySettings {
    pub max_messages: usize,
    pub max_clients: usize,
    pub max_message_len: usize,
    pub max_id_len: usize,
}

/// Partial configuration settings loaded from files or environment.
///
/// Missing values are filled in from `Settings::default()`.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub relay: Option<PartialRelaySettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct PartialRelaySettings {
    pub max_messages: Option<usize>,
    pub max_clients: Option<usize>,
    pub max_message_len: Option<usize>,
    pub max_id_len: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            relay: RelaySettings::default(),
        }
    }
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            max_messages: 500,
            max_clients: 50,
            max_message_len: 1024,
            max_id_len: 100,
        }
    }
}

impl Settings {
    /// Merges the partially specified values over the defaults.
    pub fn merged(partial: PartialSettings) -> Self {
        let default = Settings::default();
        let server = partial.server.as_ref();
        let relay = partial.relay.as_ref();

        Settings {
            server: ServerSettings {
                host: server
                    .and_then(|s| s.host.clone())
                    .unwrap_or(default.server.host),
                port: server.and_then(|s| s.port).unwrap_or(default.server.port),
            },
            relay: RelaySettings {
                max_messages: relay
                    .and_then(|r| r.max_messages)
                    .unwrap_or(default.relay.max_messages),
                max_clients: relay
                    .and_then(|r| r.max_clients)
                    .unwrap_or(default.relay.max_clients),
                max_message_len: relay
                    .and_then(|r| r.max_message_len)
                    .unwrap_or(default.relay.max_message_len),
                max_id_len: relay
                    .and_then(|r| r.max_id_len)
                    .unwrap_or(default.relay.max_id_len),
            },
        }
    }

    /// The `host:port` string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
