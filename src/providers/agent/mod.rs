//! Hosted legal-research agent client.
//!
//! The agent is an opaque external service: one POST carries the flattened
//! conversation context and returns the structured legal-analysis result.

mod auth;
mod client;
mod errors;
mod types;

pub use auth::{AgentConfig, DEFAULT_BASE_URL};
pub use client::AgentClient;
pub use errors::{AgentError, AgentErrorKind};
pub use types::ResearchResponse;
