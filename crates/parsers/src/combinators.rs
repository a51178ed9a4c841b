use crate::cursor::TextCursor;
use crate::error::{ParseError, ParseResult};
use crate::parser::Parser;
use once_cell::sync::Lazy;
use regex::Regex;

/// Chars that open (and must close) a quoted phrase
pub const QUOTE_CHARS: [char; 2] = ['"', '\''];

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("valid word regex"));
static DIGITS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("[0-9]+").expect("valid digits regex"));

/// Matches `text` exactly (case-sensitive).
pub fn literal(text: impl Into<String>) -> Literal {
    Literal { text: text.into() }
}

/// Consumes the rest of the input if it has at least `min_length` chars.
pub fn remaining(min_length: usize) -> Remaining {
    Remaining { min_length }
}

/// One or more whitespace chars.
pub fn whitespace() -> Whitespace {
    Whitespace
}

/// A single word, i.e. everything up to the next whitespace char.
pub fn word() -> Word {
    Word
}

/// A run of decimal digits.
pub fn integer() -> Integer {
    Integer
}

/// A single word, or a phrase wrapped in `"` or `'` where `\` escapes the
/// next char.
pub fn phrase() -> Phrase {
    Phrase
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    text: String,
}

impl Parser<String> for Literal {
    fn parse(&self, cursor: &mut TextCursor<'_>) -> ParseResult<String> {
        let expected = self.text.chars().count();
        if cursor.peek(expected) == self.text {
            return Ok(cursor.read_chars(expected).to_string());
        }
        Err(ParseError::new(
            format!("Expected <{}>", self.text),
            cursor.position(),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    min_length: usize,
}

impl Parser<String> for Remaining {
    fn parse(&self, cursor: &mut TextCursor<'_>) -> ParseResult<String> {
        if cursor.remaining_len() < self.min_length {
            return Err(ParseError::new(
                format!("Expected at least {} characters", self.min_length),
                cursor.position(),
            ));
        }
        Ok(cursor.read_remaining().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Whitespace;

impl Parser<String> for Whitespace {
    fn parse(&self, cursor: &mut TextCursor<'_>) -> ParseResult<String> {
        let spaces = cursor.read_while(char::is_whitespace);
        if spaces.is_empty() {
            return Err(ParseError::new("Expected some whitespace", cursor.position()));
        }
        Ok(spaces.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word;

impl Parser<String> for Word {
    fn parse(&self, cursor: &mut TextCursor<'_>) -> ParseResult<String> {
        let read = cursor.read_regex(&WORD_PATTERN);
        if read.is_empty() {
            return Err(ParseError::new("Expected a word", cursor.position()));
        }
        Ok(read.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Integer;

impl Parser<u32> for Integer {
    fn parse(&self, cursor: &mut TextCursor<'_>) -> ParseResult<u32> {
        let digits = cursor.read_regex(&DIGITS_PATTERN);
        if digits.is_empty() {
            return Err(ParseError::new("Expected an integer", cursor.position()));
        }
        digits.parse::<u32>().map_err(|err| {
            ParseError::new(format!("Couldn't parse number: {err}"), cursor.position())
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phrase;

impl Parser<String> for Phrase {
    fn parse(&self, cursor: &mut TextCursor<'_>) -> ParseResult<String> {
        let Some(quote) = cursor.peek_char().filter(|ch| QUOTE_CHARS.contains(ch)) else {
            return Word.parse(cursor);
        };
        cursor.read_char();

        let mut phrase = String::new();
        let mut escaped = false;
        let mut closed = false;
        while let Some(ch) = cursor.read_char() {
            if escaped {
                escaped = false;
                phrase.push(ch);
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                closed = true;
                break;
            } else {
                phrase.push(ch);
            }
        }

        if !closed {
            return Err(ParseError::new("Unterminated quoted phrase", cursor.position()));
        }
        if phrase.is_empty() {
            return Err(ParseError::new(
                "Expected some (optionally quoted) phrase",
                cursor.position(),
            ));
        }
        Ok(phrase)
    }
}
