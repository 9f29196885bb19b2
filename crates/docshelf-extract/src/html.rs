//! Lightweight HTML signal scanning.
//!
//! This is not a conforming HTML parser. It pulls out the handful of signals
//! the date strategies look at: `<meta>` attributes, `<time datetime>`,
//! JSON-LD script payloads, `<title>` text, and visible body text.

use once_cell::sync::Lazy;
use once_cell::unsync::OnceCell;
use regex::Regex;

static META_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid regex"));
static TIME_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<time\b[^>]*>").expect("valid regex"));
static SCRIPT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b([^>]*)>(.*?)</script\s*>").expect("valid regex")
});
static TITLE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").expect("valid regex"));
static HEAD_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<head\b[^>]*>.*?</head\s*>").expect("valid regex"));
static BODY_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<body\b[^>]*>").expect("valid regex"));
static BODY_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)</body\s*>").expect("valid regex"));
static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"));
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));
static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
        .expect("valid regex")
});

/// Attributes of a start tag, names lower-cased, values entity-decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Parse the attributes of a single start tag such as `<meta name="x" content="y">`.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        let pairs = ATTRIBUTE
            .captures_iter(tag)
            .filter_map(|caps| {
                let name = caps.get(1)?.as_str().to_ascii_lowercase();
                let value = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .or_else(|| caps.get(4))
                    .map_or("", |m| m.as_str());
                Some((name, decode_entities(value)))
            })
            .collect();
        Self(pairs)
    }

    /// First value for `name` (lower-case).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A document's raw text plus lazily computed signal views.
#[derive(Debug)]
pub struct HtmlDocument {
    raw: String,
    title: OnceCell<Option<String>>,
    body: OnceCell<String>,
}

impl HtmlDocument {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            title: OnceCell::new(),
            body: OnceCell::new(),
        }
    }

    /// The unparsed document text.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Attributes of every `<meta>` tag, in document order.
    pub fn meta_tags(&self) -> impl Iterator<Item = Attributes> + '_ {
        META_TAG
            .find_iter(&self.raw)
            .map(|m| Attributes::parse(m.as_str()))
    }

    /// Attributes of every `<time>` start tag, in document order.
    pub fn time_tags(&self) -> impl Iterator<Item = Attributes> + '_ {
        TIME_TAG
            .find_iter(&self.raw)
            .map(|m| Attributes::parse(m.as_str()))
    }

    /// Payloads of `<script type="application/ld+json">` blocks, in document order.
    pub fn json_ld_blocks(&self) -> impl Iterator<Item = &str> + '_ {
        SCRIPT_BLOCK.captures_iter(&self.raw).filter_map(|caps| {
            let attrs = Attributes::parse(caps.get(1)?.as_str());
            let is_json_ld = attrs
                .get("type")
                .is_some_and(|t| t.trim().eq_ignore_ascii_case("application/ld+json"));
            if is_json_ld {
                caps.get(2).map(|m| m.as_str())
            } else {
                None
            }
        })
    }

    /// Text content of the first `<title>` element.
    #[must_use]
    pub fn title_text(&self) -> Option<&str> {
        self.title
            .get_or_init(|| {
                TITLE_BLOCK
                    .captures(&self.raw)
                    .and_then(|caps| caps.get(1))
                    .map(|m| decode_entities(&strip_tags(m.as_str())))
            })
            .as_deref()
    }

    /// Text content of the body: everything after `<body>` (or, without a
    /// body tag, everything outside `<head>`), tags stripped.
    #[must_use]
    pub fn body_text(&self) -> &str {
        self.body.get_or_init(|| {
            let without_comments = COMMENT.replace_all(&self.raw, "");
            let section = match BODY_OPEN.find(&without_comments) {
                Some(open) => {
                    let rest = &without_comments[open.end()..];
                    match BODY_CLOSE.find(rest) {
                        Some(close) => rest[..close.start()].to_string(),
                        None => rest.to_string(),
                    }
                }
                None => HEAD_BLOCK.replace_all(&without_comments, "").into_owned(),
            };
            decode_entities(&strip_tags(&section))
        })
    }
}

fn strip_tags(html: &str) -> String {
    ANY_TAG.replace_all(html, " ").into_owned()
}

/// Decode the handful of entities that show up around dates.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
