use docbot_parsers::ParseError;
use docbot_session::SessionMiss;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CommandError>;

/// Everything that can stop a doc command short of an answer.
///
/// None of these is fatal; [`CommandError::user_message`] is what the user
/// gets to see.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Arguments or follow-up payload did not parse
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Follow-up referenced an expired, consumed or unknown choice
    #[error("Session miss: {0}")]
    Session(#[from] SessionMiss),

    /// The loader did not return exactly one element for a canonical name
    #[error("Expected one element for {name}, loader returned {count}")]
    AmbiguousLoad { name: String, count: usize },

    /// A choice payload would not fit the platform limit
    #[error("Choice payload for session {session} has {length} chars, limit is {limit}")]
    PayloadTooLong {
        session: String,
        length: usize,
        limit: usize,
    },

    /// The documentation index itself failed
    #[error("Index error: {0}")]
    Index(anyhow::Error),
}

impl CommandError {
    /// Friendly text shown in the chat instead of the error
    pub fn user_message(&self) -> String {
        match self {
            Self::Parse(err) => format!("I couldn't understand your input: {}", err.message),
            Self::Session(miss) => miss.to_string(),
            Self::AmbiguousLoad { count, .. } if *count > 1 => {
                "I found multiple elements for this qualified name".to_string()
            }
            Self::AmbiguousLoad { name, .. } => {
                format!("I couldn't load the documentation for `{name}`")
            }
            Self::PayloadTooLong { .. } => {
                "I found several matches but can't offer them as choices, please be more specific"
                    .to_string()
            }
            Self::Index(_) => "The documentation index is not available right now".to_string(),
        }
    }
}
