//! Runtime services and shared state for the responder.

use std::{future::Future, net::SocketAddr};

use tokio::net::TcpListener;
use tracing::{error, info, instrument};

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    service::{chat::ChatClient, ingress},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the chat client and configuration.
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The chat client instance.
    pub chat: ChatClient,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Res<Self> {
        // Initialize the telegram client.
        let chat = ChatClient::telegram(&config)?;

        Ok(Self { config, chat })
    }

    /// Listen on the configured port until Ctrl-C.
    pub async fn start(&self) -> Void {
        let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], self.config.port))).await?;

        self.serve(listener, wait_for_shutdown(tokio::signal::ctrl_c())).await
    }

    /// Serve events from `listener` until `shutdown` resolves.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Void
    where
        F: Future<Output = ()> + Send + 'static,
    {
        ingress::serve(listener, self.chat.clone(), shutdown).await
    }
}

/// Resolves once `signal` fires.
///
/// If the signal handler cannot be installed, this never resolves and the
/// process has to be stopped from outside.
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(err) = signal.await {
        error!("Failed to listen for the shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }

    info!("Shutting down ...");
}

// Tests.
