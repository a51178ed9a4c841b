use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionMiss>;

/// A follow-up action referenced a choice the registry cannot serve
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionMiss {
    /// Never created, already consumed, or evicted
    #[error("Couldn't find any stored choices for that message")]
    UnknownSession { key: String },

    /// The session existed but has no candidate at that index
    #[error("Somehow you provided an invalid choice")]
    InvalidChoice {
        key: String,
        index: usize,
        size: usize,
    },
}

impl SessionMiss {
    pub fn key(&self) -> &str {
        match self {
            Self::UnknownSession { key } | Self::InvalidChoice { key, .. } => key,
        }
    }
}
