//! One-shot question command handler.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::providers::agent::{AgentClient, AgentConfig};
use crate::store::Store;
use crate::{context, paths, renderer};

pub async fn run(config: &Config, question: &str, new: bool, json: bool) -> Result<()> {
    let store_path = paths::conversations_path();
    let mut store = Store::load(&store_path);

    if new {
        store.create(None);
    }

    let id = store.active_id().to_string();
    let turn_index = store
        .append_user_turn(&id, question)
        .context("record question")?;

    // Persist the pending question before the agent call.
    store.save(&store_path).context("save conversations")?;

    let agent_config = AgentConfig::from_env(
        config.model.clone(),
        config.max_tokens,
        config.effective_agent_base_url(),
        config.request_timeout(),
    )?;
    let client = AgentClient::new(agent_config)?;
    let instructions = config.effective_instructions()?;

    let prompt = context::build_context(store.active())?;
    let reply = client
        .research(&prompt, Some(&instructions))
        .await
        .context("agent request failed (the question was saved; run again to retry)")?;

    store.set_assistant_reply(&id, turn_index, &reply.analysis, reply.jurisprudence_links.clone())?;
    store.save(&store_path).context("save conversations")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else {
        println!("{}", renderer::format_reply(&reply));
    }

    Ok(())
}
