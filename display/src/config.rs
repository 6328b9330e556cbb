//! Runtime configuration for the display binary.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use clap::Parser;

use crate::state::Viewport;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid server URL: {0}")]
    InvalidServerUrl(String),
}

/// Entertainer display configuration.
#[derive(Parser, Debug, Clone)]
#[command(name = "display", about = "Big-screen entertainer display client")]
pub struct DisplayConfig {
    /// Base URL of the party server.
    #[arg(long, env = "PARTY_SERVER_URL", default_value = "http://127.0.0.1:4000")]
    pub server_url: String,

    /// Opaque session identifier. Without one the display stays on the
    /// waiting screen.
    #[arg(long, env = "PARTY_SESSION")]
    pub session: Option<String>,

    /// Stage width in logical pixels, used for reaction spawn geometry.
    #[arg(long, default_value_t = 1920.0)]
    pub viewport_width: f64,

    /// Stage height in logical pixels.
    #[arg(long, default_value_t = 1080.0)]
    pub viewport_height: f64,

    /// Exit after this many seconds instead of running until interrupted.
    #[arg(long)]
    pub run_for: Option<u64>,
}

impl DisplayConfig {
    /// WebSocket endpoint derived from the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidServerUrl`] when the base URL carries
    /// neither an `http` nor an `https` scheme.
    pub fn ws_url(&self) -> Result<String, ConfigError> {
        ws_url(&self.server_url)
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport { width: self.viewport_width, height: self.viewport_height }
    }
}

fn ws_url(base_url: &str) -> Result<String, ConfigError> {
    if let Some(rest) = base_url.strip_prefix("http://") {
        return Ok(format!("ws://{rest}/ws"));
    }
    if let Some(rest) = base_url.strip_prefix("https://") {
        return Ok(format!("wss://{rest}/ws"));
    }

    Err(ConfigError::InvalidServerUrl(base_url.to_owned()))
}
