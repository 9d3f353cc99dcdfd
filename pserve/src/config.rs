//! Environment-driven configuration for the service shell.
//!
//! Recognized variables: `GEMINI_API_KEY` / `GOOGLE_API_KEY` (required),
//! `PALAVER_MODEL`, `PALAVER_SYSTEM_PROMPT`, `PALAVER_MAX_TURNS`,
//! `PALAVER_PORT`.

use anyhow::{Context, bail};
use palaver::{DEFAULT_MAX_TURNS, DEFAULT_SYSTEM_PROMPT, GEMINI_DEFAULT_MODEL, SecretString};

pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug)]
pub struct ServeConfig {
    pub api_key: SecretString,
    pub model: String,
    pub system_prompt: String,
    pub max_turns: usize,
    pub port: u16,
}

impl ServeConfig {
    /// Reads configuration from the process environment. The API key is
    /// required and the process refuses to start without it; everything
    /// else falls back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .unwrap_or_default();

        Self::from_parts(
            api_key,
            std::env::var("PALAVER_MODEL").ok(),
            std::env::var("PALAVER_SYSTEM_PROMPT").ok(),
            std::env::var("PALAVER_MAX_TURNS").ok(),
            std::env::var("PALAVER_PORT").ok(),
        )
    }

    fn from_parts(
        api_key: String,
        model: Option<String>,
        system_prompt: Option<String>,
        max_turns: Option<String>,
        port: Option<String>,
    ) -> anyhow::Result<Self> {
        if api_key.trim().is_empty() {
            bail!("missing API key: set GEMINI_API_KEY or GOOGLE_API_KEY");
        }

        let max_turns = match max_turns {
            Some(value) => value
                .parse::<usize>()
                .context("PALAVER_MAX_TURNS must be an integer")?,
            None => DEFAULT_MAX_TURNS,
        };

        if max_turns < 2 {
            bail!("PALAVER_MAX_TURNS must be at least 2");
        }

        let port = match port {
            Some(value) => value
                .parse::<u16>()
                .context("PALAVER_PORT must be a port number")?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            api_key: SecretString::new(api_key),
            model: model.unwrap_or_else(|| GEMINI_DEFAULT_MODEL.to_string()),
            system_prompt: system_prompt.unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            max_turns,
            port,
        })
    }
}
