//! Category grouping, filter options, and counts.

use serde::Serialize;

use docshelf_core::{Article, Category};

/// Articles sharing one category, in their relative input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup<'a> {
    pub category: Category,
    pub icon: &'static str,
    pub articles: Vec<&'a Article>,
}

/// Group a query result by category.
///
/// Group order is the order in which each category first appears; within a
/// group articles keep their relative order.
#[must_use]
pub fn group_by_category<'a>(articles: &[&'a Article]) -> Vec<CategoryGroup<'a>> {
    let mut groups: Vec<CategoryGroup<'a>> = Vec::new();
    for article in articles {
        match groups.iter_mut().find(|g| g.category == article.category) {
            Some(group) => group.articles.push(article),
            None => groups.push(CategoryGroup {
                category: article.category,
                icon: article.category.header_icon(),
                articles: vec![article],
            }),
        }
    }
    groups
}

/// One entry of the category filter: a category present in the set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    pub category: Category,
    pub count: usize,
}

/// Distinct categories present in `articles`, sorted by label.
#[must_use]
pub fn category_options(articles: &[Article]) -> Vec<CategoryOption> {
    let mut options: Vec<CategoryOption> = Vec::new();
    for article in articles {
        match options.iter_mut().find(|o| o.category == article.category) {
            Some(option) => option.count += 1,
            None => options.push(CategoryOption {
                category: article.category,
                count: 1,
            }),
        }
    }
    options.sort_by(|a, b| a.category.label().cmp(b.category.label()));
    options
}

/// Counts shown alongside a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub visible: usize,
    pub watched: usize,
    pub unwatched: usize,
}

impl Stats {
    /// Counts over the whole set, with `visible` entries currently shown.
    #[must_use]
    pub fn new(articles: &[Article], visible: usize) -> Self {
        let watched = articles.iter().filter(|a| a.watched).count();
        Self {
            total: articles.len(),
            visible,
            watched,
            unwatched: articles.len() - watched,
        }
    }
}
