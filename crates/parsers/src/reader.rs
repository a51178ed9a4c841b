use crate::cursor::TextCursor;
use crate::error::ParseResult;
use crate::parser::Parser;

/// Reads command arguments one after another.
///
/// Every successful `shift` also swallows the whitespace that separates it
/// from the next argument.
#[derive(Debug, Clone)]
pub struct ArgumentReader<'a> {
    cursor: TextCursor<'a>,
}

impl<'a> ArgumentReader<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            cursor: TextCursor::new(input),
        }
    }

    pub fn cursor(&self) -> &TextCursor<'a> {
        &self.cursor
    }

    /// Parses the next argument, failing if it is not there.
    pub fn shift<T>(&mut self, parser: &impl Parser<T>) -> ParseResult<T> {
        let value = parser.parse(&mut self.cursor)?;
        self.skip_whitespace();
        Ok(value)
    }

    /// Parses an optional argument. On failure nothing is consumed.
    pub fn try_shift<T>(&mut self, parser: &impl Parser<T>) -> Option<T> {
        let start = self.cursor.position();
        match self.shift(parser) {
            Ok(value) => Some(value),
            Err(_) => {
                self.cursor.rewind(start);
                None
            }
        }
    }

    pub fn is_exhausted(&self) -> bool {
        !self.cursor.can_read()
    }

    fn skip_whitespace(&mut self) {
        self.cursor.read_while(char::is_whitespace);
    }
}
