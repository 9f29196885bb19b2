//! # docshelf-query
//!
//! Query engine for docshelf. Filters the loaded article set by search term
//! and category, orders or narrows it by sort mode, and renders the result.
//!
//! Includes:
//! - [`query`] over a borrowed article set
//! - Locale-style title collation ([`collate`])
//! - Category grouping, filter options, and counts ([`group`])
//! - Result formatter (JSON, Table, Markdown)

pub mod collate;
pub mod engine;
pub mod formatter;
pub mod group;

pub use collate::title_cmp;
pub use engine::{matches_search, query, sort_by_title, CategoryFilter, SortMode};
pub use formatter::{format_listing, Listing, OutputFormat};
pub use group::{category_options, group_by_category, CategoryGroup, CategoryOption, Stats};
