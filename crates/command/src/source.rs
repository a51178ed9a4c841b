use crate::types::Reply;
use async_trait::async_trait;

/// Where an invocation came from and where its answer goes
#[async_trait]
pub trait CommandSource: Send + Sync {
    /// Identity of the originating message or interaction; used as the
    /// session key for choices offered in reply to it
    fn id(&self) -> &str;

    /// Sends a new reply
    async fn reply(&self, reply: Reply) -> anyhow::Result<()>;

    /// Edits the message this source belongs to if it can be edited,
    /// otherwise replies
    async fn edit_or_reply(&self, reply: Reply) -> anyhow::Result<()> {
        self.reply(reply).await
    }
}

/// The three ways a doc command reaches us
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// A chat message such as `!javadoc long String#contains`
    Typed { text: String },

    /// A platform command with named options
    Structured {
        query: String,
        long: bool,
        omit_tags: bool,
    },

    /// A pressed choice, carrying its payload
    FollowUp { payload: String },
}

impl Invocation {
    pub fn typed(text: impl Into<String>) -> Self {
        Self::Typed { text: text.into() }
    }

    pub fn structured(query: impl Into<String>) -> Self {
        Self::Structured {
            query: query.into(),
            long: false,
            omit_tags: false,
        }
    }

    pub fn follow_up(payload: impl Into<String>) -> Self {
        Self::FollowUp {
            payload: payload.into(),
        }
    }
}
