//! # docshelf-extract
//!
//! Best-effort creation-date extraction for catalog documents, and the
//! concurrent loader that turns a [`Catalog`](docshelf_core::Catalog) into
//! [`Article`](docshelf_core::Article)s.
//!
//! Extraction tiers, highest confidence first: `<meta>` tags, `<time datetime>`,
//! JSON-LD, title text, body text, raw text, the last-modified value, and
//! finally the current time.

pub mod fetch;
pub mod html;
pub mod loader;
pub mod patterns;
pub mod strategy;

pub use fetch::{DocumentFetcher, FetchError, FetchedDocument, FsFetcher, MemoryFetcher};
pub use loader::load_articles;
pub use strategy::{extract_date, DateExtractor, DateStrategy, ExtractedDate, SourceDocument};
