use std::time::Duration;

use anyhow::{Context, Result};

/// Default base URL for the hosted research agent.
pub const DEFAULT_BASE_URL: &str = "https://agent.lexbr.com.br";

/// Configuration for the agent client.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    /// Bounded request timeout; None disables it.
    pub timeout: Option<Duration>,
}

impl AgentConfig {
    /// Creates a new config from environment.
    ///
    /// Environment variables:
    /// - `LEXBR_AGENT_API_KEY`: API key (required)
    /// - `LEXBR_AGENT_BASE_URL`: Optional base URL override
    ///
    /// Base URL resolution order:
    /// 1. `LEXBR_AGENT_BASE_URL` env var (if set and non-empty)
    /// 2. `config_base_url` parameter (if Some and non-empty)
    /// 3. Default: `https://agent.lexbr.com.br`
    pub fn from_env(
        model: String,
        max_tokens: u32,
        config_base_url: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let api_key = std::env::var("LEXBR_AGENT_API_KEY")
            .context("LEXBR_AGENT_API_KEY is not set. Set it to reach the research agent.")?;

        let base_url = resolve_base_url(config_base_url)?;

        Ok(Self {
            api_key,
            base_url,
            model,
            max_tokens,
            timeout,
        })
    }
}

/// Resolves the base URL with precedence: env > config > default.
/// Validates that the URL is well-formed.
fn resolve_base_url(config_base_url: Option<&str>) -> Result<String> {
    if let Ok(env_url) = std::env::var("LEXBR_AGENT_BASE_URL") {
        let trimmed = env_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    if let Some(config_url) = config_base_url {
        let trimmed = config_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    Ok(DEFAULT_BASE_URL.to_string())
}

/// Validates that a URL is well-formed.
fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid agent base URL: {}", url))?;
    Ok(())
}
