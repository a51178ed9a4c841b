//! # Docbot Session
//!
//! Pending disambiguations, kept in memory between a query that matched
//! several names and the button press that picks one of them.
//!
//! A button can only carry a short payload, so it refers to a candidate by
//! `(session key, index)` and the full qualified name stays here. Sessions are
//! single use and the oldest one is evicted once the registry is full.
//!
//! ```text
//! create_session(key, [A, B, C])      resolve(key, 1)
//!         │                                 │
//!         └──> SessionStore ──────────────> B   (entry removed)
//!              ├─ HashMap<key, entry>
//!              └─ VecDeque<key> (insertion order, evict front)
//! ```

mod error;
mod key;
mod registry;
mod store;

pub use error::{Result, SessionMiss};
pub use key::fresh_session_key;
pub use registry::{SessionHandle, SessionRegistry};
pub use store::{SessionEntry, SessionStore, DEFAULT_SESSION_CAPACITY};
