use serde::{Deserialize, Serialize};

// === API Request Types ===

#[derive(Debug, Serialize)]
pub(crate) struct ResearchRequest<'a> {
    pub(crate) model: &'a str,
    pub(crate) max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) instructions: Option<&'a str>,
    /// Flattened conversation context, exactly as the context builder
    /// produced it.
    pub(crate) input: &'a str,
}

// === API Response Types ===

/// Structured legal-analysis result returned by the research agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchResponse {
    /// The grounded legal analysis (required).
    pub analysis: String,
    /// Short summary of the analysis, when the agent produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Jurisprudence citation links supporting the analysis.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jurisprudence_links: Vec<String>,
}
