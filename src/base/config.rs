//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use serde::Deserialize;

use super::types::Res;

/// Default Telegram Bot API base URL.
fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

/// Default port to listen on for incoming events.
fn default_port() -> u16 {
    8080
}

/// Configuration for the responder.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared settings.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// The settings themselves.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// Telegram bot API token (`TELEGRAM_API_KEY`).
    #[serde(default)]
    pub telegram_api_key: String,
    /// Telegram Bot API base URL (`TELEGRAM_API_URL`).
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,
    /// Port the event listener binds to (`PORT`).
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Config {
    /// Loads settings from the environment and an optional file, then validates them.
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default());

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        result.validate()?;

        Ok(result)
    }

    /// Checks the settings we cannot run without.
    pub fn validate(&self) -> Res<()> {
        // We can't do anything without an API token.
        if self.telegram_api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("No $TELEGRAM_API_KEY found."));
        }

        if self.telegram_api_url.trim().is_empty() {
            return Err(anyhow::anyhow!("The Telegram API URL must not be empty."));
        }

        Ok(())
    }
}

// Tests.
