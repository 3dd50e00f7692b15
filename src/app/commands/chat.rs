//! Interactive chat command handler.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::providers::agent::{AgentClient, AgentConfig};
use crate::store::Store;
use crate::{chat, paths};

pub async fn run(config: &Config) -> Result<()> {
    let store_path = paths::conversations_path();
    let mut store = Store::load(&store_path);

    let agent_config = AgentConfig::from_env(
        config.model.clone(),
        config.max_tokens,
        config.effective_agent_base_url(),
        config.request_timeout(),
    )?;
    let client = AgentClient::new(agent_config)?;
    let instructions = config.effective_instructions()?;

    chat::run_interactive_chat(&client, &mut store, &store_path, &instructions)
        .await
        .context("chat failed")
}
