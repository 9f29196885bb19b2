//! Article type: the in-memory record for one catalog entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::classify;

/// Which extraction tier produced an article's `created_at`.
///
/// Variants are listed from highest to lowest confidence.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    MetaTag,
    TimeElement,
    StructuredData,
    Title,
    Body,
    RawText,
    LastModified,
    #[default]
    Now,
}

/// A catalog entry with everything derived from its identifier.
///
/// Everything except `watched` is computed once in [`Article::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub identifier: String,
    pub title: String,
    pub category: Category,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub watched: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub date_source: DateSource,
}

impl Article {
    /// Build an article from its catalog identifier and extracted date.
    #[must_use]
    pub fn new(identifier: &str, created_at: DateTime<Utc>, date_source: DateSource) -> Self {
        let title = title_from_identifier(identifier);
        let (category, icon) = classify::classify(&title);
        let description = classify::describe(&title);
        Self {
            identifier: identifier.to_string(),
            title,
            category,
            description,
            icon: icon.to_string(),
            watched: false,
            created_at,
            date_source,
        }
    }
}

/// Strip a trailing `.htm` / `.html` (any case) from an identifier.
#[must_use]
pub fn title_from_identifier(identifier: &str) -> String {
    let lower = identifier.to_ascii_lowercase();
    for ext in [".html", ".htm"] {
        if lower.ends_with(ext) {
            return identifier[..identifier.len() - ext.len()].to_string();
        }
    }
    identifier.to_string()
}
