//! Configuration management for LexBR.
//!
//! Loads configuration from ${LEXBR_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default config template with comments, embedded at compile time.
const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("default_config.toml");

/// Built-in research instructions sent with every agent request unless the
/// config overrides them.
const DEFAULT_INSTRUCTIONS: &str = crate::prompt_str!("legal_research.md");

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The agent model to use
    pub model: String,

    /// Maximum tokens for agent responses
    pub max_tokens: u32,

    /// Timeout for agent requests in seconds (0 disables)
    pub request_timeout_secs: u32,

    /// Optional agent service base URL (for test rigs or proxies)
    pub agent_base_url: Option<String>,

    /// Optional inline override of the research instructions
    pub instructions: Option<String>,

    /// Optional path to a file containing the instructions
    pub instructions_file: Option<String>,
}

impl Config {
    const DEFAULT_MODEL: &str = "gpt-4o";
    const DEFAULT_MAX_TOKENS: u32 = 1024;
    const DEFAULT_REQUEST_TIMEOUT_SECS: u32 = 60;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&crate::paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Saves only the model field to the config file.
    pub fn save_model(model: &str) -> Result<()> {
        Self::save_model_to(&crate::paths::config_path(), model)
    }

    /// Saves only the model field to a specific config file path.
    ///
    /// Creates the file with the default template if it doesn't exist.
    /// Preserves existing fields and comments using toml_edit.
    pub fn save_model_to(path: &Path, model: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?
        } else {
            DEFAULT_CONFIG_TEMPLATE.to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["model"] = value(model);

        Self::write_config(path, &doc.to_string())
    }

    /// Returns the effective research instructions.
    ///
    /// Resolution order: instructions_file > inline instructions > built-in
    /// prompt. Empty values fall through to the next source.
    pub fn effective_instructions(&self) -> Result<String> {
        if let Some(path_str) = &self.instructions_file {
            let content = fs::read_to_string(Path::new(path_str))
                .with_context(|| format!("Failed to read instructions file: {}", path_str))?;
            let trimmed = content.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
        }

        let inline = self.instructions.as_deref().unwrap_or("").trim();
        if !inline.is_empty() {
            return Ok(inline.to_string());
        }

        Ok(DEFAULT_INSTRUCTIONS.trim().to_string())
    }

    /// Returns the bounded agent request timeout, if enabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.request_timeout_secs)))
        }
    }

    /// Returns the effective agent base URL from config, if set.
    /// Empty strings are treated as unset.
    pub fn effective_agent_base_url(&self) -> Option<&str> {
        self.agent_base_url
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, DEFAULT_CONFIG_TEMPLATE)
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: Self::DEFAULT_MODEL.to_string(),
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            agent_base_url: None,
            instructions: None,
            instructions_file: None,
        }
    }
}
