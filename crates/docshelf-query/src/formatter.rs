//! Listing formatting: JSON, Table, and Markdown output.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use docshelf_core::{Article, DocshelfError};

use crate::engine::SortMode;
use crate::group::{group_by_category, CategoryGroup, Stats};

/// Output format for listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    #[default]
    Table,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = DocshelfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(DocshelfError::Query(format!(
                "unknown output format '{other}' (expected json, table, or markdown)"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Json => "json",
            OutputFormat::Table => "table",
            OutputFormat::Markdown => "markdown",
        })
    }
}

/// One query result ready for presentation.
///
/// With [`SortMode::NoSort`] the articles are shown grouped by category;
/// every other mode shows a flat list.
#[derive(Debug, Clone, Serialize)]
pub struct Listing<'a> {
    pub sort: SortMode,
    pub stats: Stats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<CategoryGroup<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub articles: Option<Vec<&'a Article>>,
}

impl<'a> Listing<'a> {
    #[must_use]
    pub fn new(all: &[Article], visible: Vec<&'a Article>, sort: SortMode) -> Self {
        let stats = Stats::new(all, visible.len());
        if sort == SortMode::NoSort {
            Self {
                sort,
                stats,
                groups: Some(group_by_category(&visible)),
                articles: None,
            }
        } else {
            Self {
                sort,
                stats,
                groups: None,
                articles: Some(visible),
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.stats.visible == 0
    }
}

/// Format a listing in the specified output format.
#[must_use]
pub fn format_listing(listing: &Listing<'_>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => format_json(listing),
        OutputFormat::Table => format_table(listing),
        OutputFormat::Markdown => format_markdown(listing),
    }
}

fn format_json(listing: &Listing<'_>) -> String {
    serde_json::to_string_pretty(listing).unwrap_or_else(|_| "{}".to_string())
}

const COLUMNS: [&str; 4] = ["title", "category", "date", "watched"];

fn row(article: &Article) -> [String; 4] {
    [
        article.title.clone(),
        article.category.label().to_string(),
        article.created_at.format("%Y-%m-%d").to_string(),
        if article.watched { "yes" } else { "" }.to_string(),
    ]
}

fn sections<'l, 'a>(listing: &'l Listing<'a>) -> Vec<(Option<&'l CategoryGroup<'a>>, &'l [&'a Article])> {
    match (&listing.groups, &listing.articles) {
        (Some(groups), _) => groups
            .iter()
            .map(|g| (Some(g), g.articles.as_slice()))
            .collect(),
        (None, Some(articles)) => vec![(None, articles.as_slice())],
        (None, None) => Vec::new(),
    }
}

fn summary(stats: &Stats) -> String {
    format!(
        "{} of {} articles shown ({} watched, {} unwatched)",
        stats.visible, stats.total, stats.watched, stats.unwatched
    )
}

fn format_table(listing: &Listing<'_>) -> String {
    if listing.is_empty() {
        return "(no results)".to_string();
    }

    let rows: Vec<[String; 4]> = sections(listing)
        .iter()
        .flat_map(|(_, articles)| articles.iter().map(|a| row(a)))
        .collect();

    // Widths are shared across sections so grouped tables line up.
    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.len()).collect();
    for r in &rows {
        for (i, cell) in r.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let pad = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:width$}", c, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };
    let header = pad(&COLUMNS.map(str::to_string));
    let separator = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");

    let mut output = String::new();
    for (group, articles) in sections(listing) {
        if let Some(group) = group {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str(&format!(
                "== {} ({}) ==\n",
                group.category.label(),
                articles.len()
            ));
        }
        output.push_str(&header);
        output.push('\n');
        output.push_str(&separator);
        output.push('\n');
        for article in articles {
            output.push_str(&pad(&row(article)));
            output.push('\n');
        }
    }
    output.push('\n');
    output.push_str(&summary(&listing.stats));
    output.push('\n');
    output
}

fn markdown_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

fn format_markdown(listing: &Listing<'_>) -> String {
    if listing.is_empty() {
        return "*No results*\n".to_string();
    }

    let mut output = String::new();
    for (group, articles) in sections(listing) {
        if let Some(group) = group {
            output.push_str(&format!("## {}\n\n", group.category.label()));
        }
        output.push_str("| ");
        output.push_str(&COLUMNS.join(" | "));
        output.push_str(" |\n");
        output.push_str("| ");
        let seps: Vec<&str> = COLUMNS.iter().map(|_| "---").collect();
        output.push_str(&seps.join(" | "));
        output.push_str(" |\n");
        for article in articles {
            let cells: Vec<String> = row(article).iter().map(|c| markdown_cell(c)).collect();
            output.push_str("| ");
            output.push_str(&cells.join(" | "));
            output.push_str(" |\n");
        }
        output.push('\n');
    }
    output.push_str(&format!("*{}*\n", summary(&listing.stats)));
    output
}
