use crate::cursor::TextCursor;
use crate::error::ParseResult;
use std::marker::PhantomData;

/// A composable parsing unit.
///
/// Implementations either consume input and return a value, or fail with a
/// [`crate::ParseError`]. A failing parser may leave the cursor wherever it
/// detected the mismatch; [`Parser::or`] is what restores it.
pub trait Parser<T> {
    fn parse(&self, cursor: &mut TextCursor<'_>) -> ParseResult<T>;

    /// Parses a whole string from its start.
    fn parse_str(&self, input: &str) -> ParseResult<T> {
        self.parse(&mut TextCursor::new(input))
    }

    /// Tries `self`, and on failure rewinds and tries `other` from the same
    /// position.
    fn or<P>(self, other: P) -> Or<Self, P>
    where
        Self: Sized,
        P: Parser<T>,
    {
        Or {
            first: self,
            second: other,
        }
    }

    fn map<U, F>(self, f: F) -> Map<Self, F, T>
    where
        Self: Sized,
        F: Fn(T) -> U,
    {
        Map {
            parser: self,
            f,
            _output: PhantomData,
        }
    }
}

impl<T, F> Parser<T> for F
where
    F: Fn(&mut TextCursor<'_>) -> ParseResult<T>,
{
    fn parse(&self, cursor: &mut TextCursor<'_>) -> ParseResult<T> {
        self(cursor)
    }
}

/// Alternation, see [`Parser::or`]
#[derive(Debug, Clone)]
pub struct Or<A, B> {
    first: A,
    second: B,
}

impl<T, A, B> Parser<T> for Or<A, B>
where
    A: Parser<T>,
    B: Parser<T>,
{
    fn parse(&self, cursor: &mut TextCursor<'_>) -> ParseResult<T> {
        let start = cursor.position();
        match self.first.parse(cursor) {
            Ok(value) => Ok(value),
            Err(_) => {
                cursor.rewind(start);
                self.second.parse(cursor)
            }
        }
    }
}

/// Value conversion, see [`Parser::map`]
pub struct Map<P, F, T> {
    parser: P,
    f: F,
    _output: PhantomData<fn() -> T>,
}

impl<P, F, T, U> Parser<U> for Map<P, F, T>
where
    P: Parser<T>,
    F: Fn(T) -> U,
{
    fn parse(&self, cursor: &mut TextCursor<'_>) -> ParseResult<U> {
        self.parser.parse(cursor).map(&self.f)
    }
}
