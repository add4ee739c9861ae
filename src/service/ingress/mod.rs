//! HTTP ingress for CloudEvents.
//!
//! Every event arrives as a `POST /`, is decoded by [`binding::from_http`], and
//! is handed to the responder. The acknowledgment becomes the HTTP response.
//! Liveness and readiness probes are served alongside.

pub mod binding;

use std::future::Future;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::{
    base::types::{Acknowledgment, Void},
    interaction,
    service::chat::ChatClient,
};

/// Builds the router serving events and health probes.
pub fn router(chat: ChatClient) -> Router {
    Router::new()
        .route("/", post(handle_event))
        .route("/health/liveness", get(health))
        .route("/health/readiness", get(health))
        .with_state(chat)
}

/// Serves the router on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, chat: ChatClient, shutdown: F) -> Void
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Listening for events on {} ...", listener.local_addr()?);

    axum::serve(listener, router(chat)).with_graceful_shutdown(shutdown).await?;

    Ok(())
}

#[instrument(skip_all)]
async fn handle_event(State(chat): State<ChatClient>, headers: HeaderMap, body: Bytes) -> Acknowledgment {
    let event = binding::from_http(&headers, &body);

    interaction::cloud_event::handle_cloud_event(event, chat)
}

async fn health() -> &'static str {
    "OK"
}

impl IntoResponse for Acknowledgment {
    fn into_response(self) -> Response {
        match self {
            Acknowledgment::NoContent { status_code } => StatusCode::from_u16(status_code).unwrap_or(StatusCode::NO_CONTENT).into_response(),
            message @ Acknowledgment::Message { .. } => (StatusCode::OK, Json(message)).into_response(),
        }
    }
}
