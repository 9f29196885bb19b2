//! # docshelf-store
//!
//! Local persistence for docshelf.
//!
//! Everything lives in one string key-value store. Two keys are used:
//! `watchedArticles`, the JSON array of watched identifiers, and
//! `auth.session`, the session-gate record. Corrupt values degrade to their
//! empty default with a warning.

pub mod kv;
pub mod session;
pub mod watch;

pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use session::{SessionGate, SessionRecord, SESSION_KEY};
pub use watch::{WatchStateStore, WATCHED_KEY};
