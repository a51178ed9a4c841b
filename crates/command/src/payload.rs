use crate::types::DisplayMode;
use docbot_parsers::{integer, whitespace, word, ParseError, ParseResult, Parser, TextCursor};

/// What a choice carries back when it is pressed.
///
/// Wire format: `<display-mode> <index> <session-key>`, e.g. `long 3 8xT2f0aQ`.
/// Only the index travels, the qualified name stays in the session registry
/// so the payload fits the platform's short limit whatever the name length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUpPayload {
    pub display: DisplayMode,
    pub index: usize,
    pub session: String,
}

impl FollowUpPayload {
    pub fn new(display: DisplayMode, index: usize, session: impl Into<String>) -> Self {
        Self {
            display,
            index,
            session: session.into(),
        }
    }

    pub fn encode(&self) -> String {
        format!("{} {} {}", self.display.as_word(), self.index, self.session)
    }

    /// Parses a payload; surrounding whitespace is ignored, anything after the
    /// session key is not.
    pub fn parse(payload: &str) -> ParseResult<Self> {
        let mut cursor = TextCursor::new(payload.trim());

        let display = DisplayMode::from_word(&word().parse(&mut cursor)?);
        whitespace().parse(&mut cursor)?;
        let index = integer().parse(&mut cursor)?;
        whitespace().parse(&mut cursor)?;
        let session = word().parse(&mut cursor)?;

        if cursor.can_read() {
            return Err(ParseError::new("Unexpected input after session key", cursor.position()));
        }

        let index = usize::try_from(index)
            .map_err(|err| ParseError::new(format!("Index out of range: {err}"), 0))?;
        Ok(Self {
            display,
            index,
            session,
        })
    }
}
