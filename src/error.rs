//! Errors raised at the assistant's fallible edges (config, rules, history).
//!
//! Classification itself never fails.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid conversation history: {0}")]
    History(#[from] serde_json::Error),

    #[error("rule '{name}' is invalid: {reason}")]
    InvalidRule { name: String, reason: String },

    #[error("rule '{0}' is defined more than once")]
    DuplicateRule(String),

    #[error("confidence threshold {0} is outside [0, 1)")]
    InvalidThreshold(f32),
}

impl AssistantError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AssistantError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AssistantError>;
