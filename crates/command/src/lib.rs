//! # Docbot Command
//!
//! The `doc` chat command: turns a free-text query into a documentation
//! answer, and asks the user to pick when the query is ambiguous.
//!
//! ## Flow
//!
//! ```text
//! Invocation (typed | structured | follow-up)
//!     │
//!     ├──> argument parsing (docbot-parsers)
//!     │
//!     ├──> QueryApi::query ──> Vec<QueryMatch>
//!     │
//!     └──> plan()
//!            ├─ Resolved        → ElementLoader → Reply::Element
//!            ├─ Unresolved      → Reply::Notice
//!            ├─ AmbiguousSmall  → SessionRegistry + Reply::Choices
//!            │                    (payload: "<short|long> <index> <session>")
//!            └─ AmbiguousLarge  → Reply::Preview
//! ```
//!
//! A pressed choice comes back as `Invocation::FollowUp`; its index is
//! resolved against the registry and the full qualified name is queried
//! again.
//!
//! Querying, loading and rendering live behind [`QueryApi`],
//! [`ElementLoader`] and [`CommandSource`].

mod collaborators;
mod config;
mod doc_command;
mod error;
mod payload;
mod protocol;
mod shortener;
mod source;
mod types;

pub use collaborators::{ElementLoader, NameShortener, QueryApi};
pub use config::CommandConfig;
pub use doc_command::{DocCommand, Outcome};
pub use error::{CommandError, Result};
pub use payload::FollowUpPayload;
pub use protocol::{abbreviate, plan, Disambiguation};
pub use shortener::SuffixShortener;
pub use source::{CommandSource, Invocation};
pub use types::{
    Choice, DisplayMode, DocElement, DocTag, LoadedElement, QueryMatch, Reply, ReplyOptions,
};
