//! Interactive chat module.
//!
//! REPL that maintains the transcript store across turns. Each question is
//! appended and persisted before the agent call, so a failed call never
//! loses what the user typed; the reply and its citation links are recorded
//! and persisted before rendering.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;

use crate::context;
use crate::providers::agent::{AgentClient, AgentError};
use crate::renderer;
use crate::store::Store;

const QUIT_COMMAND: &str = ":q";
const NEW_COMMAND: &str = ":new";
const LIST_COMMAND: &str = ":list";
const SWITCH_COMMAND: &str = ":switch";
const PROMPT_PREFIX: &str = "you> ";

/// Runs the interactive chat loop.
///
/// Reads user input from `input`, writes responses to `output`.
/// Exits on `:q` command or EOF.
pub async fn run_chat<R, W>(
    input: R,
    output: &mut W,
    client: &AgentClient,
    store: &mut Store,
    store_path: &Path,
    instructions: &str,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed == QUIT_COMMAND {
            writeln!(output, "Goodbye!")?;
            break;
        }

        // Skip empty lines
        if trimmed.is_empty() {
            prompt(output)?;
            continue;
        }

        if handle_command(trimmed, output, store, store_path)? {
            prompt(output)?;
            continue;
        }

        ask(trimmed, output, client, store, store_path, instructions).await?;
        prompt(output)?;
    }

    Ok(())
}

/// Handles a `:command` line. Returns true if the line was a command.
fn handle_command<W: Write>(
    line: &str,
    output: &mut W,
    store: &mut Store,
    store_path: &Path,
) -> Result<bool> {
    if line == NEW_COMMAND {
        let id = store.create(None);
        report_save(output, store, store_path)?;
        writeln!(output, "Started {} ({})", store.active().title, id)?;
        return Ok(true);
    }

    if line == LIST_COMMAND {
        for conversation in store.conversations() {
            let marker = if conversation.id == store.active_id() {
                "*"
            } else {
                " "
            };
            writeln!(
                output,
                "{} {}  {}  ({} turns)",
                marker,
                conversation.id,
                conversation.title,
                conversation.turns.len()
            )?;
        }
        return Ok(true);
    }

    if let Some(rest) = line.strip_prefix(SWITCH_COMMAND) {
        let id = rest.trim();
        match store.set_active(id) {
            Ok(()) => writeln!(output, "Switched to {}", store.active().title)?,
            Err(e) => writeln!(output, "Error: {}", e)?,
        }
        return Ok(true);
    }

    // Don't forward a mistyped command to the agent as a question.
    if line.starts_with(':') {
        writeln!(output, "Unknown command: {}", line)?;
        return Ok(true);
    }

    Ok(false)
}

/// Processes one question end to end: append, persist, call, record, render.
async fn ask<W: Write>(
    question: &str,
    output: &mut W,
    client: &AgentClient,
    store: &mut Store,
    store_path: &Path,
    instructions: &str,
) -> Result<()> {
    let active_id = store.active_id().to_string();
    let turn_index = match store.append_user_turn(&active_id, question) {
        Ok(index) => index,
        Err(e) => {
            writeln!(output, "Error: {}", e)?;
            return Ok(());
        }
    };

    // The pending question is durable before the agent call.
    report_save(output, store, store_path)?;

    let context = context::build_context(store.active())?;

    match client.research(&context, Some(instructions)).await {
        Ok(reply) => {
            store.set_assistant_reply(
                &active_id,
                turn_index,
                &reply.analysis,
                reply.jurisprudence_links.clone(),
            )?;
            report_save(output, store, store_path)?;
            writeln!(output, "{}", renderer::format_reply(&reply))?;
        }
        Err(e) => {
            // The pending turn stays in the transcript; the user can ask
            // again or give up, but nothing typed is lost.
            if let Some(agent_error) = e.downcast_ref::<AgentError>() {
                if agent_error.is_retryable() {
                    writeln!(output, "Error: {} (retryable, ask again to retry)", agent_error)?;
                } else {
                    writeln!(output, "Error: {}", agent_error)?;
                }
            } else {
                writeln!(output, "Error: {}", e)?;
            }
        }
    }

    Ok(())
}

/// Persists the store, reporting failures to the user instead of dropping
/// them or killing the session.
fn report_save<W: Write>(output: &mut W, store: &Store, store_path: &Path) -> Result<()> {
    if let Err(e) = store.save(store_path) {
        writeln!(output, "Warning: {}", e)?;
    }
    Ok(())
}

/// Writes the input prompt.
fn prompt<W: Write>(output: &mut W) -> Result<()> {
    write!(output, "{}", PROMPT_PREFIX)?;
    output.flush()?;
    Ok(())
}

/// Runs the chat loop with stdin/stdout.
pub async fn run_interactive_chat(
    client: &AgentClient,
    store: &mut Store,
    store_path: &Path,
    instructions: &str,
) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    writeln!(
        stdout,
        "LexBR Chat (:q to quit, :new for a fresh conversation, :list / :switch <id> to change)"
    )?;
    writeln!(
        stdout,
        "Conversation: {} ({})",
        store.active().title,
        store.active_id()
    )?;
    prompt(&mut stdout)?;

    run_chat(
        stdin.lock(),
        &mut stdout,
        client,
        store,
        store_path,
        instructions,
    )
    .await
}
