//! Date extraction as a prioritized chain of strategies.
//!
//! Each strategy proposes at most one candidate string. A candidate that does
//! not parse to a real instant counts as "not found" and the chain moves on.
//! If the whole chain comes up empty the extractor returns the current time,
//! so the result is always a valid instant.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use docshelf_core::DateSource;

use crate::fetch::DocumentFetcher;
use crate::html::HtmlDocument;
use crate::patterns::{self, BODY_PATTERNS, TITLE_PATTERNS};

/// A fetched document as seen by the strategies.
#[derive(Debug)]
pub struct SourceDocument {
    pub html: HtmlDocument,
    pub last_modified: Option<String>,
}

impl SourceDocument {
    #[must_use]
    pub fn new(content: impl Into<String>, last_modified: Option<String>) -> Self {
        Self {
            html: HtmlDocument::new(content),
            last_modified,
        }
    }
}

/// One tier of the extraction chain.
pub trait DateStrategy: Send + Sync {
    /// Provenance recorded when this tier wins.
    fn source(&self) -> DateSource;

    /// The raw date text this tier found, if any.
    fn candidate(&self, doc: &SourceDocument) -> Option<String>;

    /// Parse this tier's candidate; `None` if absent or not a real instant.
    fn extract(&self, doc: &SourceDocument) -> Option<DateTime<Utc>> {
        let candidate = self.candidate(doc)?;
        let parsed = patterns::parse_date(&candidate);
        if parsed.is_none() {
            debug!(tier = ?self.source(), %candidate, "discarding unparseable date candidate");
        }
        parsed
    }
}

/// `<meta>` tags, tried by field name in preference order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaTagStrategy;

/// (attribute, value) pairs in preference order.
pub const META_FIELDS: &[(&str, &str)] = &[
    ("name", "date"),
    ("name", "created"),
    ("name", "published"),
    ("property", "article:published_time"),
    ("property", "article:published"),
    ("name", "article:published_time"),
];

impl DateStrategy for MetaTagStrategy {
    fn source(&self) -> DateSource {
        DateSource::MetaTag
    }

    fn candidate(&self, doc: &SourceDocument) -> Option<String> {
        let metas: Vec<_> = doc.html.meta_tags().collect();
        META_FIELDS.iter().find_map(|(attr, value)| {
            metas
                .iter()
                .find(|m| m.get(attr) == Some(*value) && m.get("content").is_some())
                .and_then(|m| m.get("content").map(str::to_string))
        })
    }
}

/// The first `<time>` element carrying a `datetime` attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeElementStrategy;

impl DateStrategy for TimeElementStrategy {
    fn source(&self) -> DateSource {
        DateSource::TimeElement
    }

    fn candidate(&self, doc: &SourceDocument) -> Option<String> {
        doc.html
            .time_tags()
            .find_map(|attrs| attrs.get("datetime").map(str::to_string))
    }
}

/// JSON-LD structured data blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredDataStrategy;

/// JSON-LD fields in preference order.
pub const JSON_LD_FIELDS: &[&str] = &["datePublished", "dateCreated", "dateModified"];

fn json_ld_date(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => {
            let own = JSON_LD_FIELDS.iter().find_map(|field| {
                map.get(*field)
                    .and_then(Value::as_str)
                    .filter(|s| !s.trim().is_empty())
                    .map(str::to_string)
            });
            own.or_else(|| map.get("@graph").and_then(json_ld_date))
        }
        Value::Array(items) => items.iter().find_map(json_ld_date),
        _ => None,
    }
}

impl DateStrategy for StructuredDataStrategy {
    fn source(&self) -> DateSource {
        DateSource::StructuredData
    }

    fn candidate(&self, doc: &SourceDocument) -> Option<String> {
        doc.html.json_ld_blocks().find_map(|block| {
            match serde_json::from_str::<Value>(block.trim()) {
                Ok(value) => json_ld_date(&value),
                Err(e) => {
                    debug!(error = %e, "skipping malformed JSON-LD block");
                    None
                }
            }
        })
    }
}

/// Which text a [`PatternStrategy`] scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextScope {
    Title,
    Body,
    Raw,
}

/// Regex scan over one view of the document text.
#[derive(Debug, Clone, Copy)]
pub struct PatternStrategy {
    pub scope: TextScope,
    pub patterns: &'static [Regex],
}

impl PatternStrategy {
    #[must_use]
    pub fn title() -> Self {
        Self {
            scope: TextScope::Title,
            patterns: TITLE_PATTERNS.as_slice(),
        }
    }

    #[must_use]
    pub fn body() -> Self {
        Self {
            scope: TextScope::Body,
            patterns: BODY_PATTERNS.as_slice(),
        }
    }

    #[must_use]
    pub fn raw() -> Self {
        Self {
            scope: TextScope::Raw,
            patterns: BODY_PATTERNS.as_slice(),
        }
    }
}

impl DateStrategy for PatternStrategy {
    fn source(&self) -> DateSource {
        match self.scope {
            TextScope::Title => DateSource::Title,
            TextScope::Body => DateSource::Body,
            TextScope::Raw => DateSource::RawText,
        }
    }

    fn candidate(&self, doc: &SourceDocument) -> Option<String> {
        let text = match self.scope {
            TextScope::Title => doc.html.title_text()?,
            TextScope::Body => doc.html.body_text(),
            TextScope::Raw => doc.html.raw(),
        };
        patterns::first_match(self.patterns, text).map(str::to_string)
    }
}

/// The transport's last-modified value.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastModifiedStrategy;

impl DateStrategy for LastModifiedStrategy {
    fn source(&self) -> DateSource {
        DateSource::LastModified
    }

    fn candidate(&self, doc: &SourceDocument) -> Option<String> {
        doc.last_modified.clone()
    }
}

/// The standard chain, highest confidence first.
#[must_use]
pub fn default_chain() -> Vec<Box<dyn DateStrategy>> {
    vec![
        Box::new(MetaTagStrategy),
        Box::new(TimeElementStrategy),
        Box::new(StructuredDataStrategy),
        Box::new(PatternStrategy::title()),
        Box::new(PatternStrategy::body()),
        Box::new(PatternStrategy::raw()),
        Box::new(LastModifiedStrategy),
    ]
}

/// A creation timestamp with the tier that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractedDate {
    pub at: DateTime<Utc>,
    pub source: DateSource,
}

impl ExtractedDate {
    /// The terminal fallback.
    #[must_use]
    pub fn now() -> Self {
        Self {
            at: Utc::now(),
            source: DateSource::Now,
        }
    }
}

/// Runs a strategy chain over documents.
pub struct DateExtractor {
    chain: Vec<Box<dyn DateStrategy>>,
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DateExtractor {
    /// An extractor using [`default_chain`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_chain(default_chain())
    }

    #[must_use]
    pub fn with_chain(chain: Vec<Box<dyn DateStrategy>>) -> Self {
        Self { chain }
    }

    /// Run the chain over an already fetched document. `None` means every
    /// tier came up empty; callers fall back to the current time.
    #[must_use]
    pub fn extract_from(&self, doc: &SourceDocument) -> Option<ExtractedDate> {
        self.chain.iter().find_map(|strategy| {
            strategy.extract(doc).map(|at| ExtractedDate {
                at,
                source: strategy.source(),
            })
        })
    }

    /// Fetch `identifier` and extract its creation date. Never fails: fetch
    /// errors and empty chains both yield the current time.
    pub async fn extract(&self, identifier: &str, fetcher: &dyn DocumentFetcher) -> ExtractedDate {
        let fetched = match fetcher.fetch(identifier).await {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(%identifier, error = %e, "could not fetch document; using current time");
                return ExtractedDate::now();
            }
        };

        let doc = SourceDocument::new(fetched.content, fetched.last_modified);
        match self.extract_from(&doc) {
            Some(found) => {
                debug!(%identifier, source = ?found.source, at = %found.at, "extracted date");
                found
            }
            None => {
                debug!(%identifier, "no date signal; using current time");
                ExtractedDate::now()
            }
        }
    }
}

/// Fetch `identifier` and return its best-effort creation timestamp.
pub async fn extract_date(identifier: &str, fetcher: &dyn DocumentFetcher) -> DateTime<Utc> {
    DateExtractor::new().extract(identifier, fetcher).await.at
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchedDocument, MemoryFetcher};
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn run(content: &str, last_modified: Option<&str>) -> Option<ExtractedDate> {
        let doc = SourceDocument::new(content, last_modified.map(str::to_string));
        DateExtractor::new().extract_from(&doc)
    }

    #[test]
    fn meta_tag_beats_everything_else() {
        let html = r#"<head><title>2001-01-01</title>
            <meta name="published" content="2023-06-07">
            <meta name="date" content="2022-02-02"></head>
            <body><time datetime="2020-01-01"></time></body>"#;
        let found = run(html, None).unwrap();
        // "date" is preferred over "published" regardless of document order.
        assert_eq!(found.at, utc(2022, 2, 2));
        assert_eq!(found.source, DateSource::MetaTag);
    }

    #[test]
    fn property_meta_is_recognised() {
        let html =
            r#"<meta property="article:published_time" content="2024-05-06T07:08:09+00:00">"#;
        let found = run(html, None).unwrap();
        assert_eq!(found.at, Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap());
    }

    #[test]
    fn time_element_when_no_meta() {
        let html = r#"<body><time>soon</time><time datetime="2021-04-05">x</time></body>"#;
        let found = run(html, None).unwrap();
        assert_eq!(found.at, utc(2021, 4, 5));
        assert_eq!(found.source, DateSource::TimeElement);
    }

    #[test]
    fn json_ld_prefers_published_and_skips_malformed_blocks() {
        let html = r#"
            <script type="application/ld+json">{ not json</script>
            <script type="application/ld+json">{"dateModified":"2020-01-01","datePublished":"2019-09-09"}</script>"#;
        let found = run(html, None).unwrap();
        assert_eq!(found.at, utc(2019, 9, 9));
        assert_eq!(found.source, DateSource::StructuredData);
    }

    #[test]
    fn json_ld_graph_members_are_searched() {
        let html = r#"<script type="application/ld+json">
            {"@context":"https://schema.org","@graph":[{"@type":"WebSite"},{"@type":"Article","dateCreated":"2018-08-08"}]}
            </script>"#;
        assert_eq!(run(html, None).unwrap().at, utc(2018, 8, 8));
    }

    #[test]
    fn title_pattern_before_body() {
        let html = "<title>Digest - March 3, 2022</title><body>2010-10-10</body>";
        let found = run(html, None).unwrap();
        assert_eq!(found.at, utc(2022, 3, 3));
        assert_eq!(found.source, DateSource::Title);
    }

    #[test]
    fn body_text_pattern() {
        let html = "<title>No date</title><body><p>Posted 12 Feb 2023</p></body>";
        let found = run(html, None).unwrap();
        assert_eq!(found.at, utc(2023, 2, 12));
        assert_eq!(found.source, DateSource::Body);
    }

    #[test]
    fn raw_text_catches_dates_hidden_in_markup() {
        // Only an attribute carries the date, so body text has none.
        let html = r#"<body><div data-created="2017-07-17"></div></body>"#;
        let found = run(html, None).unwrap();
        assert_eq!(found.at, utc(2017, 7, 17));
        assert_eq!(found.source, DateSource::RawText);
    }

    #[test]
    fn invalid_candidate_falls_through_to_next_tier() {
        let html = r#"<meta name="date" content="garbage"><time datetime="2021-04-05"></time>"#;
        let found = run(html, None).unwrap();
        assert_eq!(found.source, DateSource::TimeElement);

        // 02/30 matches a body pattern but is not a real day.
        let found = run("<body>02/30/2024</body>", Some("Wed, 21 Oct 2015 07:28:00 GMT")).unwrap();
        assert_eq!(found.source, DateSource::LastModified);
        assert_eq!(found.at, Utc.with_ymd_and_hms(2015, 10, 21, 7, 28, 0).unwrap());
    }

    #[test]
    fn no_signals_yields_none() {
        assert!(run("<p>nothing here</p>", None).is_none());
        assert!(run("<p>nothing here</p>", Some("not a date")).is_none());
    }

    #[tokio::test]
    async fn extract_falls_back_to_last_modified() {
        let mut fetcher = MemoryFetcher::new();
        fetcher.insert(
            "a.htm",
            FetchedDocument {
                content: "<p>no dates</p>".to_string(),
                last_modified: Some("Tue, 02 Jan 2024 03:04:05 GMT".to_string()),
            },
        );
        let found = DateExtractor::new().extract("a.htm", &fetcher).await;
        assert_eq!(found.source, DateSource::LastModified);
        assert_eq!(found.at, Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
    }

    #[tokio::test]
    async fn failing_fetch_yields_current_time() {
        let before = Utc::now();
        let at = extract_date("missing.htm", &MemoryFetcher::new()).await;
        let after = Utc::now();
        assert!(at >= before && at <= after);
    }

    #[tokio::test]
    async fn document_without_signals_yields_current_time() {
        let fetcher = MemoryFetcher::new().with("a.htm", "<p>nothing</p>");
        let before = Utc::now();
        let found = DateExtractor::new().extract("a.htm", &fetcher).await;
        assert_eq!(found.source, DateSource::Now);
        assert!(found.at >= before);
    }

    #[test]
    fn custom_chain_is_respected() {
        let extractor = DateExtractor::with_chain(vec![Box::new(LastModifiedStrategy)]);
        let doc = SourceDocument::new(
            r#"<meta name="date" content="2022-02-02">"#,
            Some("Tue, 02 Jan 2024 03:04:05 GMT".to_string()),
        );
        assert_eq!(
            extractor.extract_from(&doc).unwrap().source,
            DateSource::LastModified
        );
    }
}
