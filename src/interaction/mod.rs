//! Event handling and user interactions for the responder.
//!
//! This module provides functionality for answering chat events:
//! - Dispatching incoming CloudEvents by type
//! - Rendering face analysis results into reply text

pub mod cloud_event;
pub mod format;
