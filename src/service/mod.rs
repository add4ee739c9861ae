//! Service integrations for external APIs and clients.
//!
//! This module contains the edges of the responder:
//! - Chat services (e.g., Telegram), where replies go out.
//! - Ingress, where CloudEvents come in over HTTP.
//!
//! Each service module defines both generic traits and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod chat;
pub mod ingress;
