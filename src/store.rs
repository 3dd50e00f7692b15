//! Conversation transcript store.
//!
//! All conversations for a session live in one JSON document at
//! ${LEXBR_HOME}/conversations.json, keyed by conversation id:
//!
//! ```json
//! {
//!   "1": {
//!     "title": "Conversa 1",
//!     "messages": [
//!       { "user": "...", "model": "...", "links": ["https://..."] }
//!     ]
//!   }
//! }
//! ```
//!
//! The store is in-memory-authoritative: commands mutate the in-memory
//! structure and persist the whole document afterwards. Saves are atomic
//! (temp file + rename). Load is best-effort: an unreadable or corrupt
//! document logs a warning and starts empty rather than failing startup.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A single exchange: the user's question and, once the agent has answered,
/// the reply plus any jurisprudence links.
///
/// The assistant field serializes as `model` to match the on-disk document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub user: String,
    #[serde(rename = "model", skip_serializing_if = "Option::is_none")]
    pub assistant: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
}

impl Turn {
    /// A turn is pending while the agent call for it is outstanding.
    pub fn is_pending(&self) -> bool {
        self.assistant.is_none()
    }
}

/// One named, ordered transcript of turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub turns: Vec<Turn>,
}

/// On-disk value for one conversation (the id is the document key).
#[derive(Debug, Serialize, Deserialize)]
struct ConversationDoc {
    title: String,
    messages: Vec<Turn>,
}

/// Errors from store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Operation referenced a missing conversation or turn.
    NotFound(String),
    /// The turn already has an assistant reply recorded.
    AlreadySet { id: String, turn: usize },
    /// A turn violated the local contract (e.g. empty user message).
    InvalidTurn(String),
    /// Saving the transcript document failed.
    Persistence(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(what) => write!(f, "{} not found", what),
            StoreError::AlreadySet { id, turn } => write!(
                f,
                "turn {} of conversation '{}' already has a reply",
                turn, id
            ),
            StoreError::InvalidTurn(reason) => write!(f, "invalid turn: {}", reason),
            StoreError::Persistence(reason) => write!(f, "failed to persist conversations: {}", reason),
        }
    }
}

impl std::error::Error for StoreError {}

/// The full collection of conversations plus the active-selection pointer.
///
/// Invariants maintained by every operation:
/// - at least one conversation exists,
/// - the active id references an existing conversation,
/// - ids are allocated monotonically and never reused within a session.
#[derive(Debug)]
pub struct Store {
    conversations: Vec<Conversation>,
    active: String,
    next_id: u64,
}

impl Store {
    /// Creates a store with a single empty bootstrap conversation.
    pub fn new() -> Self {
        let mut store = Self {
            conversations: Vec::new(),
            active: String::new(),
            next_id: 1,
        };
        store.create(None);
        store
    }

    /// Loads the persisted document, falling back to an empty store.
    ///
    /// Parse and IO failures are logged, never propagated: a broken
    /// transcript file must not brick the session. A missing file is the
    /// normal first-run case.
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no transcript document, starting fresh");
                return Self::new();
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to read transcript document, starting empty"
                );
                return Self::new();
            }
        };

        let doc: BTreeMap<String, ConversationDoc> = match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse transcript document, starting empty"
                );
                return Self::new();
            }
        };

        let mut conversations: Vec<Conversation> = doc
            .into_iter()
            .map(|(id, doc)| Conversation {
                id,
                title: doc.title,
                turns: doc.messages,
            })
            .collect();

        // Ids are allocated monotonically, so numeric order is insertion order.
        conversations.sort_by(|a, b| numeric_id(&a.id).cmp(&numeric_id(&b.id)));

        if conversations.is_empty() {
            return Self::new();
        }

        let next_id = conversations
            .iter()
            .filter_map(|c| c.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        let active = conversations[0].id.clone();

        Self {
            conversations,
            active,
            next_id,
        }
    }

    /// Serializes the full store atomically (temp file + rename).
    ///
    /// Unlike `load`, save errors propagate: user data is never silently
    /// discarded.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let mut doc = serde_json::Map::new();
        for conversation in &self.conversations {
            let value = serde_json::to_value(ConversationDoc {
                title: conversation.title.clone(),
                messages: conversation.turns.clone(),
            })
            .map_err(|e| StoreError::Persistence(e.to_string()))?;
            doc.insert(conversation.id.clone(), value);
        }

        let contents = serde_json::to_string_pretty(&serde_json::Value::Object(doc))
            .map_err(|e| StoreError::Persistence(e.to_string()))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::Persistence(format!("create {}: {}", parent.display(), e)))?;
        }

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, contents)
            .map_err(|e| StoreError::Persistence(format!("write {}: {}", tmp_path.display(), e)))?;
        fs::rename(&tmp_path, path).map_err(|e| {
            StoreError::Persistence(format!(
                "rename {} to {}: {}",
                tmp_path.display(),
                path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Allocates the next identifier, inserts an empty conversation, and
    /// makes it active. Returns the new id.
    pub fn create(&mut self, title: Option<&str>) -> String {
        let id = self.next_id.to_string();
        self.next_id += 1;

        let title = match title {
            Some(t) if !t.trim().is_empty() => t.trim().to_string(),
            _ => format!("Conversa {}", id),
        };

        self.conversations.push(Conversation {
            id: id.clone(),
            title,
            turns: Vec::new(),
        });
        self.active = id.clone();
        id
    }

    /// Appends a user turn to a conversation and returns its index.
    ///
    /// The assistant field stays unset until `set_assistant_reply`.
    pub fn append_user_turn(&mut self, id: &str, text: &str) -> Result<usize, StoreError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(StoreError::InvalidTurn("empty user message".to_string()));
        }

        let conversation = self.get_mut(id)?;
        conversation.turns.push(Turn {
            user: trimmed.to_string(),
            assistant: None,
            links: Vec::new(),
        });
        Ok(conversation.turns.len() - 1)
    }

    /// Records the agent's reply for a pending turn.
    ///
    /// A reply is set exactly once; a second attempt fails with
    /// `AlreadySet` and leaves the recorded reply intact.
    pub fn set_assistant_reply(
        &mut self,
        id: &str,
        turn_index: usize,
        text: &str,
        links: Vec<String>,
    ) -> Result<(), StoreError> {
        let conversation = self.get_mut(id)?;
        let turn = conversation
            .turns
            .get_mut(turn_index)
            .ok_or_else(|| StoreError::NotFound(format!("turn {} of conversation '{}'", turn_index, id)))?;

        if turn.assistant.is_some() {
            return Err(StoreError::AlreadySet {
                id: id.to_string(),
                turn: turn_index,
            });
        }

        turn.assistant = Some(text.to_string());
        turn.links = links;
        Ok(())
    }

    /// Renames a conversation. Renaming to the current title is a no-op.
    pub fn rename(&mut self, id: &str, new_title: &str) -> Result<(), StoreError> {
        let conversation = self.get_mut(id)?;
        if conversation.title != new_title {
            conversation.title = new_title.to_string();
        }
        Ok(())
    }

    /// Deletes a conversation, repairing the active pointer.
    ///
    /// If the deleted conversation was active, the first remaining one (by
    /// insertion order) becomes active; deleting the last conversation
    /// bootstraps a fresh empty one.
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let index = self
            .conversations
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("conversation '{}'", id)))?;
        self.conversations.remove(index);

        if self.active == id {
            match self.conversations.first() {
                Some(first) => self.active = first.id.clone(),
                None => {
                    self.create(None);
                }
            }
        }
        Ok(())
    }

    /// Changes the active conversation.
    pub fn set_active(&mut self, id: &str) -> Result<(), StoreError> {
        if self.conversations.iter().any(|c| c.id == id) {
            self.active = id.to_string();
            Ok(())
        } else {
            Err(StoreError::NotFound(format!("conversation '{}'", id)))
        }
    }

    /// Returns the active conversation id.
    pub fn active_id(&self) -> &str {
        &self.active
    }

    /// Returns the active conversation.
    pub fn active(&self) -> &Conversation {
        self.conversations
            .iter()
            .find(|c| c.id == self.active)
            .unwrap_or_else(|| &self.conversations[0])
    }

    /// Looks up a conversation by id.
    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    /// All conversations in insertion order.
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Conversation, StoreError> {
        self.conversations
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("conversation '{}'", id)))
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Sort key recovering insertion order from numeric ids. Non-numeric ids
/// (hand-edited documents) sort last, by string.
fn numeric_id(id: &str) -> (u64, String) {
    match id.parse::<u64>() {
        Ok(n) => (n, String::new()),
        Err(_) => (u64::MAX, id.to_string()),
    }
}
