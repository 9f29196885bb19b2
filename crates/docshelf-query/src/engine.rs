//! Query engine: filter, then sort or narrow by mode.
//!
//! [`query`] is a pure function of its inputs; it borrows the article set
//! and returns references in display order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use docshelf_core::{Article, DocshelfError};

use crate::collate::title_cmp;

/// How the filtered set is ordered or narrowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Keep input order; presentation groups by category.
    #[default]
    NoSort,
    /// Newest `created_at` first.
    Date,
    /// Alphabetical by title.
    Title,
    /// Only watched articles, input order.
    Watched,
    /// Only unwatched articles, input order.
    Unwatched,
}

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::NoSort,
        SortMode::Date,
        SortMode::Title,
        SortMode::Watched,
        SortMode::Unwatched,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::NoSort => "no-sort",
            SortMode::Date => "date",
            SortMode::Title => "title",
            SortMode::Watched => "watched",
            SortMode::Unwatched => "unwatched",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = DocshelfError;

    /// Unknown modes are rejected rather than treated as `no-sort`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| {
                DocshelfError::Query(format!(
                    "unknown sort mode '{s}' (expected one of: no-sort, date, title, watched, unwatched)"
                ))
            })
    }
}

/// Category restriction: everything, or one exact category label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(&self, article: &Article) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(label) => article.category.label() == label,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(s.to_string())
        })
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(label) => f.write_str(label),
        }
    }
}

/// Returns `true` if the lower-cased term occurs in the article's title,
/// category label, or description. The empty term matches everything.
#[must_use]
pub fn matches_search(article: &Article, search_term: &str) -> bool {
    let term = search_term.to_lowercase();
    article.title.to_lowercase().contains(&term)
        || article.category.label().to_lowercase().contains(&term)
        || article.description.to_lowercase().contains(&term)
}

/// Produce the visible, ordered subset of `articles`.
///
/// 1. Keep articles matching `search_term` and `category`.
/// 2. Apply `sort`: narrow to watched/unwatched, or stable-sort by date
///    (newest first) or title; `NoSort` leaves input order untouched.
#[must_use]
pub fn query<'a>(
    articles: &'a [Article],
    search_term: &str,
    category: &CategoryFilter,
    sort: SortMode,
) -> Vec<&'a Article> {
    let mut visible: Vec<&Article> = articles
        .iter()
        .filter(|a| matches_search(a, search_term) && category.matches(a))
        .collect();

    match sort {
        SortMode::Watched => visible.retain(|a| a.watched),
        SortMode::Unwatched => visible.retain(|a| !a.watched),
        // `sort_by` is stable, so ties keep input order.
        SortMode::Date => visible.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortMode::Title => visible.sort_by(|a, b| title_cmp(&a.title, &b.title)),
        SortMode::NoSort => {}
    }

    trace!(
        search = %search_term,
        category = %category,
        sort = %sort,
        visible = visible.len(),
        "query evaluated"
    );
    visible
}

/// Order a freshly loaded article set alphabetically by title.
pub fn sort_by_title(articles: &mut [Article]) {
    articles.sort_by(|a, b| title_cmp(&a.title, &b.title));
}
