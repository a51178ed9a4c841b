use regex::Regex;

/// Position-tracked, read-only view over a single input string.
///
/// Positions are byte offsets and always sit on a char boundary; all counts
/// passed to `peek`/`read_chars` are in chars. Reads only move forward. The
/// one way back is [`TextCursor::rewind`], reserved for alternation and the
/// argument reader.
#[derive(Debug, Clone)]
pub struct TextCursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> TextCursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Everything from the current position onward, without consuming it
    pub fn remaining(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// Number of chars left to read
    pub fn remaining_len(&self) -> usize {
        self.remaining().chars().count()
    }

    pub fn can_read(&self) -> bool {
        self.position < self.input.len()
    }

    /// Up to `n` chars from the current position; never advances.
    pub fn peek(&self, n: usize) -> &'a str {
        let rest = self.remaining();
        &rest[..char_prefix_len(rest, n)]
    }

    pub fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Reads one char, or `None` at end of input.
    pub fn read_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    /// Reads `n` chars. Asking for more than is left clamps to the rest of
    /// the input.
    pub fn read_chars(&mut self, n: usize) -> &'a str {
        let read = self.peek(n);
        self.position += read.len();
        read
    }

    /// Reads the maximal run of chars matching `predicate` (possibly empty).
    pub fn read_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> &'a str {
        let rest = self.remaining();
        let end = rest
            .char_indices()
            .find(|(_, ch)| !predicate(*ch))
            .map_or(rest.len(), |(idx, _)| idx);
        self.position += end;
        &rest[..end]
    }

    /// Matches `pattern` anchored at the current position. On a miss the
    /// cursor stays put and the empty string is returned.
    pub fn read_regex(&mut self, pattern: &Regex) -> &'a str {
        let rest = self.remaining();
        match pattern.find(rest) {
            Some(found) if found.start() == 0 => {
                self.position += found.end();
                found.as_str()
            }
            _ => "",
        }
    }

    pub fn read_remaining(&mut self) -> &'a str {
        let rest = self.remaining();
        self.position = self.input.len();
        rest
    }

    /// Moves the cursor back to a position snapshot taken earlier.
    pub(crate) fn rewind(&mut self, position: usize) {
        debug_assert!(position <= self.position);
        debug_assert!(self.input.is_char_boundary(position));
        self.position = position;
    }
}

fn char_prefix_len(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(idx, _)| idx)
}
