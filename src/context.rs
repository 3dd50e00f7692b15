//! Context building and turn rendering.
//!
//! The agent is stateless between calls: the full conversation is flattened
//! and re-sent with every question. `build_context` produces that flat
//! prompt text; `render` produces the display view model the terminal
//! surface consumes. Both are deterministic over well-formed conversations
//! and fail fast on malformed turns instead of rendering blank.

use crate::store::{Conversation, StoreError, Turn};

/// Display-ready view of one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTurn {
    pub user: String,
    pub assistant: Option<String>,
    pub links: Vec<String>,
    /// True while the agent call for this turn is outstanding.
    pub pending: bool,
}

/// Flattens a conversation into the prompt text sent to the agent.
///
/// Format, one pair of lines per turn with trailing whitespace trimmed:
///
/// ```text
/// User: {user}
/// Assistant: {assistant_or_empty}
/// ```
pub fn build_context(conversation: &Conversation) -> Result<String, StoreError> {
    let mut lines: Vec<String> = Vec::with_capacity(conversation.turns.len() * 2);

    for turn in &conversation.turns {
        check_turn(turn)?;
        lines.push(format!("User: {}", turn.user).trim_end().to_string());
        lines.push(
            format!("Assistant: {}", turn.assistant.as_deref().unwrap_or(""))
                .trim_end()
                .to_string(),
        );
    }

    Ok(lines.join("\n"))
}

/// Produces the turn-by-turn view model for display.
pub fn render(conversation: &Conversation) -> Result<Vec<DisplayTurn>, StoreError> {
    conversation
        .turns
        .iter()
        .map(|turn| {
            check_turn(turn)?;
            Ok(DisplayTurn {
                user: turn.user.clone(),
                assistant: turn.assistant.clone(),
                links: turn.links.clone(),
                pending: turn.is_pending(),
            })
        })
        .collect()
}

fn check_turn(turn: &Turn) -> Result<(), StoreError> {
    if turn.user.trim().is_empty() {
        return Err(StoreError::InvalidTurn(
            "turn without a user message".to_string(),
        ));
    }
    Ok(())
}
