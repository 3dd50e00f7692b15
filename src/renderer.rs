//! Terminal rendering of agent replies and conversation transcripts.
//!
//! Output contract: assistant content goes to stdout, status and errors go
//! to stderr. The chat loop and the `conversations` commands both format
//! through here so pending turns and citation links always look the same.

use std::fmt::Write as _;

use crate::context;
use crate::providers::agent::ResearchResponse;
use crate::store::{Conversation, StoreError};

/// Formats a structured agent reply for display.
///
/// The analysis comes first, then the summary when present, then the
/// jurisprudence links as a bulleted list.
pub fn format_reply(reply: &ResearchResponse) -> String {
    let mut output = String::new();
    output.push_str(reply.analysis.trim_end());

    if let Some(summary) = reply.summary.as_deref()
        && !summary.trim().is_empty()
    {
        let _ = write!(output, "\n\nResumo: {}", summary.trim());
    }

    if !reply.jurisprudence_links.is_empty() {
        output.push_str("\n\nJurisprudência:");
        for link in &reply.jurisprudence_links {
            let _ = write!(output, "\n- {}", link);
        }
    }

    output
}

/// Formats a conversation transcript in a human-readable format.
///
/// Pending turns (agent call still outstanding or failed) are marked
/// explicitly instead of rendering an empty reply.
pub fn format_transcript(conversation: &Conversation) -> Result<String, StoreError> {
    let turns = context::render(conversation)?;

    let mut output = String::new();
    let _ = write!(
        output,
        "### {} (conversation {})\n\n",
        conversation.title, conversation.id
    );

    for turn in turns {
        output.push_str("### You\n");
        output.push_str(&turn.user);
        output.push_str("\n\n");

        if turn.pending {
            output.push_str("### Assistant (pending)\n\n");
            continue;
        }

        output.push_str("### Assistant\n");
        output.push_str(turn.assistant.as_deref().unwrap_or(""));
        output.push_str("\n\n");

        if !turn.links.is_empty() {
            output.push_str("### Jurisprudência\n");
            for link in &turn.links {
                let _ = writeln!(output, "- {}", link);
            }
            output.push('\n');
        }
    }

    Ok(output.trim_end().to_string())
}
