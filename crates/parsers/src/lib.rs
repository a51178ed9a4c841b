//! # Docbot Parsers
//!
//! Small parser combinators for command arguments typed into a chat box.
//!
//! ## Architecture
//!
//! ```text
//! raw text
//!     │
//!     ├──> TextCursor (position-tracked view, prefix-consuming reads)
//!     │
//!     ├──> Parser<T> combinators
//!     │      ├─ literal / word / integer / phrase
//!     │      ├─ whitespace / remaining(min)
//!     │      └─ a.or(b) rewinds the cursor before trying b
//!     │
//!     └──> ArgumentReader (shift / try_shift with whitespace skipping)
//! ```
//!
//! Every parser returns a [`ParseResult`]; nothing panics on bad input.
//!
//! ## Example
//!
//! ```rust
//! use docbot_parsers::{integer, literal, ArgumentReader, Parser};
//!
//! let mut reader = ArgumentReader::new("javadoc long 3");
//! let keyword = reader.shift(&literal("doc").or(literal("javadoc"))).unwrap();
//! assert_eq!(keyword, "javadoc");
//! assert!(reader.try_shift(&literal("long")).is_some());
//! assert_eq!(reader.shift(&integer()).unwrap(), 3);
//! assert!(reader.is_exhausted());
//! ```

mod combinators;
mod cursor;
mod error;
mod parser;
mod reader;

pub use combinators::{
    integer, literal, phrase, remaining, whitespace, word, Integer, Literal, Phrase, Remaining,
    Whitespace, Word, QUOTE_CHARS,
};
pub use cursor::TextCursor;
pub use error::{ParseError, ParseResult};
pub use parser::{Map, Or, Parser};
pub use reader::ArgumentReader;
