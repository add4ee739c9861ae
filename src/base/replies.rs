//! Fixed reply texts sent back to the chat.

/// Reply to a plain text message: greet and explain what the bot does.
pub const GREETING: &str = "👋 😃
Send me an image with faces in it and I will analyze it for you.";

/// Opening line of every analysis reply.
pub const ANALYSIS_HEADER: &str = "Hi! Thanks for playing. 😃";
