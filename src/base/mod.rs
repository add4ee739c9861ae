//! Core components, types, and utilities for the responder.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - Fixed reply texts sent back to the chat.
//! - Event payloads, common types, and result handling.

pub mod config;
pub mod replies;
pub mod types;
