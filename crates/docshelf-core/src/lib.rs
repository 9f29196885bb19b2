//! # docshelf-core
//!
//! Core types, classifier rules, and configuration for docshelf.
//!
//! This crate defines the foundational types used across all other docshelf crates:
//! - [`Article`]: the derived record for one catalog entry
//! - [`Category`]: the closed set of category labels
//! - Classifier rule tables ([`classify`]): ordered keyword rules, first match wins
//! - [`Catalog`]: the ordered list of document identifiers
//! - [`Config`]: `docshelf.toml` settings
//! - Error hierarchy ([`DocshelfError`], [`CatalogError`])

pub mod article;
pub mod catalog;
pub mod category;
pub mod classify;
pub mod config;
pub mod error;

pub use article::{Article, DateSource};
pub use catalog::Catalog;
pub use category::Category;
pub use config::Config;
pub use error::{CatalogError, DocshelfError, Result};
