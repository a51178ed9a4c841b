use docbot_session::DEFAULT_SESSION_CAPACITY;
use serde::{Deserialize, Serialize};

/// Limits of the doc command and of the chat platform it answers on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    /// Prefix of typed commands, e.g. `!` in `!doc String`
    pub command_prefix: String,

    /// Pending disambiguations kept before the oldest is dropped
    pub registry_capacity: usize,

    /// Choices the platform shows side by side
    pub choices_per_row: usize,

    /// Rows of choices one reply may carry
    pub max_choice_rows: usize,

    /// Names listed when there are too many matches to offer choices
    pub preview_limit: usize,

    /// Choice labels longer than this are abbreviated with `...`
    pub label_max_chars: usize,

    /// Hard platform limit for a choice payload
    pub payload_max_chars: usize,

    /// Shortest query accepted
    pub min_query_chars: usize,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            command_prefix: "!".to_string(),
            registry_capacity: DEFAULT_SESSION_CAPACITY,
            choices_per_row: 5,
            max_choice_rows: 5,
            preview_limit: 10,
            label_max_chars: 80,
            payload_max_chars: 100,
            min_query_chars: 2,
        }
    }
}

impl CommandConfig {
    /// Match counts below this are offered as choices
    pub fn choice_limit(&self) -> usize {
        self.choices_per_row.saturating_mul(self.max_choice_rows)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.registry_capacity == 0 {
            return Err("registry_capacity must be > 0".to_string());
        }

        if self.choices_per_row == 0 || self.max_choice_rows == 0 {
            return Err(format!(
                "choices_per_row ({}) and max_choice_rows ({}) must be > 0",
                self.choices_per_row, self.max_choice_rows
            ));
        }

        if self.preview_limit == 0 {
            return Err("preview_limit must be > 0".to_string());
        }

        // Room for at least one char plus the "..." marker
        if self.label_max_chars < 4 {
            return Err(format!(
                "label_max_chars ({}) must be at least 4",
                self.label_max_chars
            ));
        }

        if self.payload_max_chars == 0 {
            return Err("payload_max_chars must be > 0".to_string());
        }

        if self.command_prefix.chars().any(char::is_whitespace) {
            return Err("command_prefix must not contain whitespace".to_string());
        }

        Ok(())
    }
}
