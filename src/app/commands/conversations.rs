//! Conversation command handlers.

use anyhow::{Context, Result};

use crate::store::Store;
use crate::{paths, renderer};

pub fn list() -> Result<()> {
    let store = Store::load(&paths::conversations_path());

    for conversation in store.conversations() {
        let marker = if conversation.id == store.active_id() {
            "*"
        } else {
            " "
        };
        println!(
            "{} {}  {}  ({} turns)",
            marker,
            conversation.id,
            conversation.title,
            conversation.turns.len()
        );
    }
    Ok(())
}

pub fn show(id: &str) -> Result<()> {
    let store = Store::load(&paths::conversations_path());
    let conversation = store
        .get(id)
        .with_context(|| format!("conversation '{}' not found", id))?;

    println!("{}", renderer::format_transcript(conversation)?);
    Ok(())
}

pub fn new(title: Option<&str>) -> Result<()> {
    let store_path = paths::conversations_path();
    let mut store = Store::load(&store_path);

    let id = store.create(title);
    store.save(&store_path).context("save conversations")?;

    println!("Created conversation {} ({})", id, store.active().title);
    Ok(())
}

pub fn rename(id: &str, title: &str) -> Result<()> {
    let store_path = paths::conversations_path();
    let mut store = Store::load(&store_path);

    store.rename(id, title)?;
    store.save(&store_path).context("save conversations")?;

    println!("Renamed conversation {} to '{}'", id, title);
    Ok(())
}

pub fn delete(id: &str) -> Result<()> {
    let store_path = paths::conversations_path();
    let mut store = Store::load(&store_path);

    store.delete(id)?;
    store.save(&store_path).context("save conversations")?;

    println!("Deleted conversation {}", id);
    Ok(())
}
