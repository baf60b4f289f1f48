//! Chat orchestration configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Tuning knobs for the chat handler.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Number of prior turns included in the conversation prompt
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Maximum accepted user message length in characters
    #[serde(default = "default_max_message_len")]
    pub max_message_len: usize,
}

impl ChatConfig {
    /// Validate chat configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.history_window == 0 {
            return Err(ValidationError::InvalidHistoryWindow(self.history_window));
        }

        if self.max_message_len == 0 {
            return Err(ValidationError::InvalidMaxMessageLen(self.max_message_len));
        }

        Ok(())
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
            max_message_len: default_max_message_len(),
        }
    }
}

fn default_history_window() -> usize {
    5
}

fn default_max_message_len() -> usize {
    2_000
}
