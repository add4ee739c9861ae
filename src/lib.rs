//! Library root for `telegram-responder`.
//!
//! The responder answers Telegram chat events delivered as CloudEvents:
//! - Image analysis results are rendered into a per-face summary of age and emotions
//! - Plain text messages get a short greeting explaining what to send
//!
//! Replies go out through the Telegram Bot API. The caller is acknowledged
//! immediately, and the reply is delivered in the background.

#[deny(missing_docs)]
pub mod base;
pub mod interaction;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use rustls::crypto;
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the responder runtime:
/// - Initializes the crypto provider
/// - Creates the runtime context with the chat client
/// - Serves incoming events until shutdown
pub async fn start(config: Config) -> Void {
    info!("Starting telegram-responder ...");

    // Start the crypto provider.
    crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install the default crypto provider."))?;

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config)?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
