//! HTTP transport
//!
//! This file implements the HTTP front of the relay. Responsibilities:
//! - Route `POST` (publish) and `GET` (poll) on any path to the broker
//! - Decode form bodies and query strings into broker calls
//! - Answer with plain-text bodies, a permissive CORS header and
//!   `Connection: close`
//!
//! Framing, keep-alive negotiation and malformed requests are left to axum/hyper.
//! Every other method, HEAD included, is answered with `405 Method Not Allowed`.
//! This departs from the original relay, which closed the connection without
//! writing any response. HEAD gets its own handler because axum would otherwise
//! run the GET handler for it, advancing the client's cursor while the body is
//! discarded.

use std::future::Future;

use axum::Router;
use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::header::{self, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::broker::engine::lock;
use crate::broker::SharedBroker;
use crate::transport::message::{PollRequest, PublishRequest};
use crate::utils::error::{RelayError, ServerError};

/// Builds the relay router around a shared broker.
pub fn build_router(broker: SharedBroker) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(poll).post(publish).head(not_served))
        .route("/{*path}", get(poll).post(publish).head(not_served))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(broker)
}

/// Serves the relay on `listener` until `shutdown` resolves.
pub async fn start_http_server<F>(
    listener: TcpListener,
    broker: SharedBroker,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("HTTP relay listening on http://{addr}");
    }

    axum::serve(listener, build_router(broker))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn publish(State(broker): State<SharedBroker>, body: Bytes) -> Response {
    let body = String::from_utf8_lossy(&body);
    let request = PublishRequest::from_form(&body);

    lock(&broker).publish(&request.client_id, &request.message);
    plain_text(StatusCode::OK, "OK".to_string())
}

async fn poll(State(broker): State<SharedBroker>, RawQuery(query): RawQuery) -> Response {
    let request = PollRequest::from_query(query.as_deref());

    let batch = lock(&broker).poll(&request.client_id);
    match batch {
        Ok(batch) => plain_text(StatusCode::OK, batch),
        Err(e) => e.into_response(),
    }
}

/// Answers HEAD without touching the broker.
async fn not_served() -> Response {
    let mut response = plain_text(StatusCode::METHOD_NOT_ALLOWED, String::new());
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static("GET, POST"));
    response
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = match self {
            RelayError::RegistryFull { .. } => StatusCode::SERVICE_UNAVAILABLE,
        };
        plain_text(status, self.to_string())
    }
}

fn plain_text(status: StatusCode, body: String) -> Response {
    let length = body.len();
    (
        status,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/plain")),
            (header::CONTENT_LENGTH, HeaderValue::from(length)),
            (header::CONNECTION, HeaderValue::from_static("close")),
        ],
        body,
    )
        .into_response()
}
