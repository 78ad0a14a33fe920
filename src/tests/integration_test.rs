use crate::broker::Broker;
use crate::client::RelayClient;
use crate::config::RelaySettings;
use crate::transport::start_http_server;
use crate::utils::error::ClientError;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Starts a relay on an ephemeral port and returns a client for it plus the
/// sender that stops the server.
async fn setup_server(settings: RelaySettings) -> (RelayClient, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("local addr");
    let broker = Broker::shared(&settings);
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    tokio::spawn(start_http_server(listener, broker, async move {
        let _ = stop_rx.await;
    }));

    (RelayClient::new(&format!("http://{addr}")), stop_tx)
}

#[tokio::test]
async fn integration_publish_and_poll_end_to_end() {
    let (client, _stop) = setup_server(RelaySettings::default()).await;

    client.publish("alice", "Hello World").await.unwrap();
    client.publish("bob", "hi alice & co").await.unwrap();

    assert_eq!(client.poll("carol").await.unwrap(), "Hello World\nhi alice & co\n");
    assert_eq!(client.poll("carol").await.unwrap(), "");
    assert_eq!(client.poll("alice").await.unwrap(), "hi alice & co\n");
    assert_eq!(client.poll("bob").await.unwrap(), "Hello World\n");
}

#[tokio::test]
async fn integration_special_characters_round_trip() {
    let (client, _stop) = setup_server(RelaySettings::default()).await;

    client.publish("ünïcode id", "50% off + free=yes?").await.unwrap();
    assert_eq!(
        client.poll("reader").await.unwrap(),
        "50% off + free=yes?\n"
    );
    assert_eq!(client.poll("ünïcode id").await.unwrap(), "");
}

#[tokio::test]
async fn integration_registry_full_reports_status() {
    let (client, _stop) = setup_server(RelaySettings {
        max_clients: 1,
        ..RelaySettings::default()
    })
    .await;

    client.poll("first").await.unwrap();
    match client.poll("second").await {
        Err(ClientError::Status(status)) => assert_eq!(status.as_u16(), 503),
        other => panic!("Expected 503, got {other:?}"),
    }
}

#[tokio::test]
async fn integration_server_stops_on_shutdown() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let broker = Broker::shared(&RelaySettings::default());
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let server = tokio::spawn(start_http_server(listener, broker, async move {
        let _ = stop_rx.await;
    }));

    stop_tx.send(()).unwrap();
    let result = tokio::time::timeout(std::time::Duration::from_secs(5), server)
        .await
        .expect("server did not stop")
        .expect("server task panicked");
    assert!(result.is_ok());
}
