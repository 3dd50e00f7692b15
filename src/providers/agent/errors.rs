use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Categories of agent errors for consistent error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentErrorKind {
    /// HTTP status error (4xx, 5xx)
    HttpStatus,
    /// Connection timeout or request timeout
    Timeout,
    /// Failed to reach the service at all
    Connect,
    /// Failed to parse the structured response
    Parse,
}

impl fmt::Display for AgentErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentErrorKind::HttpStatus => write!(f, "http_status"),
            AgentErrorKind::Timeout => write!(f, "timeout"),
            AgentErrorKind::Connect => write!(f, "connect"),
            AgentErrorKind::Parse => write!(f, "parse"),
        }
    }
}

/// Structured error from the agent service with kind and details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentError {
    /// Error category
    pub kind: AgentErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// Optional additional details (e.g., raw error body)
    pub details: Option<String>,
    /// HTTP status, when the error came from a status code
    pub status: Option<u16>,
}

impl AgentError {
    /// Creates a new agent error.
    pub fn new(kind: AgentErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
            status: None,
        }
    }

    /// Creates an HTTP status error, extracting a cleaner message from a
    /// JSON error body when one is present.
    pub fn http_status(status: u16, body: &str) -> Self {
        let mut error = Self {
            kind: AgentErrorKind::HttpStatus,
            message: format!("HTTP {}", status),
            details: None,
            status: Some(status),
        };

        if body.is_empty() {
            return error;
        }

        if let Ok(json) = serde_json::from_str::<Value>(body)
            && let Some(error_obj) = json.get("error")
            && let Some(msg) = error_obj.get("message").and_then(|v| v.as_str())
        {
            error.message = format!("HTTP {}: {}", status, msg);
        }
        error.details = Some(body.to_string());
        error
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::Timeout, message)
    }

    /// Creates a connection error.
    pub fn connect(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::Connect, message)
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::Parse, message)
    }

    /// Whether retrying the same request may succeed.
    ///
    /// Timeouts, connection failures, rate limits, and server-side errors
    /// are retryable; client errors and malformed responses are not.
    pub fn is_retryable(&self) -> bool {
        match self.kind {
            AgentErrorKind::Timeout | AgentErrorKind::Connect => true,
            AgentErrorKind::HttpStatus => {
                matches!(self.status, Some(429) | Some(500..))
            }
            AgentErrorKind::Parse => false,
        }
    }
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AgentError {}
