//! Path resolution for LexBR configuration and data directories.
//!
//! LEXBR_HOME resolution order:
//! 1. LEXBR_HOME environment variable (if set)
//! 2. ~/.config/lexbr (default)

use std::path::PathBuf;

/// Returns the LexBR home directory.
///
/// Checks LEXBR_HOME env var first, falls back to ~/.config/lexbr
pub fn lexbr_home() -> PathBuf {
    if let Ok(home) = std::env::var("LEXBR_HOME") {
        return PathBuf::from(home);
    }

    dirs::home_dir()
        .map(|h| h.join(".config").join("lexbr"))
        .expect("Could not determine home directory")
}

/// Returns the path to the config.toml file.
pub fn config_path() -> PathBuf {
    lexbr_home().join("config.toml")
}

/// Returns the path to the persisted transcript document.
pub fn conversations_path() -> PathBuf {
    lexbr_home().join("conversations.json")
}
