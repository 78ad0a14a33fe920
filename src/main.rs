//! CLI for Pollcast
//!
//! Subcommands:
//! - `server`: run the HTTP relay
//! - `publish`: post a single message (useful for smoke tests)
//! - `poll`: fetch unseen messages once, or keep polling

use std::time::Duration;

use clap::Parser;
use pollcast::broker::Broker;
use pollcast::broker::engine::lock;
use pollcast::client::{RelayClient, generate_client_id};
use pollcast::config::load_config;
use pollcast::transport::start_http_server;
use pollcast::utils::error::ServerError;
use tokio::net::TcpListener;
use tracing::{error, info};

const DEFAULT_URL: &str = "http://127.0.0.1:8080";

#[derive(Parser)]
#[command(name = "pollcast")]
enum Command {
    /// Start the HTTP relay
    Server,
    /// Publish one message
    Publish {
        /// Relay URL to connect to
        #[arg(long, default_value = DEFAULT_URL)]
        url: String,
        /// Sender identity (a random one is generated if omitted)
        #[arg(long)]
        client_id: Option<String>,
        /// Message text
        message: String,
    },
    /// Fetch messages not seen yet
    Poll {
        /// Relay URL to connect to
        #[arg(long, default_value = DEFAULT_URL)]
        url: String,
        /// Identity to poll as (a random one is generated if omitted)
        #[arg(long)]
        client_id: Option<String>,
        /// Keep polling at this interval until interrupted
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    pollcast::utils::logging::init("info");

    let cmd = Command::parse();

    match cmd {
        Command::Server => {
            if let Err(e) = run_server().await {
                error!("Server failed: {}", e);
            }
        }
        Command::Publish {
            url,
            client_id,
            message,
        } => {
            let client_id = client_id.unwrap_or_else(generate_client_id);
            if let Err(e) = RelayClient::new(&url).publish(&client_id, &message).await {
                error!("Publish failed: {}", e);
            }
        }
        Command::Poll {
            url,
            client_id,
            interval_ms,
        } => {
            let client_id = client_id.unwrap_or_else(generate_client_id);
            if let Err(e) = run_poll(&url, &client_id, interval_ms).await {
                error!("Poll failed: {}", e);
            }
        }
    }
}

async fn run_server() -> Result<(), ServerError> {
    let config = load_config()?;
    let addr = config.bind_addr();
    let broker = Broker::shared(&config.relay);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    start_http_server(listener, broker.clone(), shutdown_signal()).await?;

    let stats = lock(&broker).stats();
    info!(
        published = stats.published,
        dropped_empty = stats.dropped_empty,
        dropped_full = stats.dropped_full,
        polls = stats.polls,
        delivered = stats.delivered,
        rejected_clients = stats.rejected_clients,
        "Relay stopped"
    );
    Ok(())
}

async fn run_poll(
    url: &str,
    client_id: &str,
    interval_ms: Option<u64>,
) -> Result<(), pollcast::utils::error::ClientError> {
    let client = RelayClient::new(url);
    info!("Polling {} as {}", client.base_url(), client_id);

    let Some(interval_ms) = interval_ms else {
        print!("{}", client.poll(client_id).await?);
        return Ok(());
    };

    let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                print!("{}", client.poll(client_id).await?);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted. Exiting.");
                return Ok(());
            }
        }
    }
}

/// Resolves on Ctrl-C, or on SIGTERM where available.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received. Exiting gracefully.");
}
