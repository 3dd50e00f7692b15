use anyhow::{Context, Result};

use super::auth::{AgentConfig, DEFAULT_BASE_URL};
use super::errors::AgentError;
use super::types::{ResearchRequest, ResearchResponse};

const RESEARCH_PATH: &str = "/v1/research";

/// Client for the hosted research agent.
pub struct AgentClient {
    config: AgentConfig,
    http: reqwest::Client,
}

impl AgentClient {
    /// Creates a new agent client with the given configuration.
    ///
    /// # Panics
    /// - In test builds (`#[cfg(test)]`), panics if `base_url` is the production service.
    /// - At runtime, panics if `LEXBR_BLOCK_REAL_API=1` and `base_url` is the production service.
    ///
    /// This prevents tests from accidentally making real network requests.
    /// Use `LEXBR_AGENT_BASE_URL` env var or config to point to a mock server.
    pub fn new(config: AgentConfig) -> Result<Self> {
        // Compile-time guard for unit tests
        #[cfg(test)]
        if config.base_url == DEFAULT_BASE_URL {
            panic!(
                "Tests must not use the production agent service!\n\
                 Set LEXBR_AGENT_BASE_URL to a mock server (e.g., wiremock).\n\
                 Found base_url: {}",
                config.base_url
            );
        }

        // Runtime guard for integration tests (set LEXBR_BLOCK_REAL_API=1 in test harness)
        #[cfg(not(test))]
        if std::env::var("LEXBR_BLOCK_REAL_API").is_ok_and(|v| v == "1")
            && config.base_url == DEFAULT_BASE_URL
        {
            panic!(
                "LEXBR_BLOCK_REAL_API=1 but trying to use the production agent service!\n\
                 Set LEXBR_AGENT_BASE_URL to a mock server.\n\
                 Found base_url: {}",
                config.base_url
            );
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("build http client")?;

        Ok(Self { config, http })
    }

    /// Sends the flattened conversation context and returns the structured
    /// legal-analysis result.
    ///
    /// One bounded-timeout request per call; the service holds no state
    /// between calls.
    pub async fn research(
        &self,
        input: &str,
        instructions: Option<&str>,
    ) -> Result<ResearchResponse> {
        let request = ResearchRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            instructions,
            input,
        };

        let url = format!("{}{}", self.config.base_url, RESEARCH_PATH);

        tracing::debug!(model = %self.config.model, input_bytes = input.len(), "sending research request");

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("content-type", "application/json")
            .header("accept", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(Self::classify_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(AgentError::http_status(status.as_u16(), &error_body).into());
        }

        let reply: ResearchResponse = response
            .json()
            .await
            .map_err(|e| AgentError::parse(format!("invalid agent response: {}", e)))?;

        // The analysis field is the one required part of the contract.
        if reply.analysis.trim().is_empty() {
            return Err(AgentError::parse("agent returned an empty analysis").into());
        }

        Ok(reply)
    }

    /// Maps transport-level failures onto the agent error taxonomy.
    fn classify_reqwest_error(e: reqwest::Error) -> anyhow::Error {
        if e.is_timeout() {
            AgentError::timeout(format!("request timed out: {}", e)).into()
        } else {
            AgentError::connect(format!("request failed: {}", e)).into()
        }
    }
}
