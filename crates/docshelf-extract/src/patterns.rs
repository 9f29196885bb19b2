//! Date-shaped text patterns and lenient date parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

const MONTHS: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";
const MONTHS_SHORT: &str = "Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec";

fn compile(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect()
}

/// Patterns tried against `<title>` text, in order.
pub static TITLE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"[0-9]{4}-[0-9]{2}-[0-9]{2}".to_string(),
        r"[0-9]{2}/[0-9]{2}/[0-9]{4}".to_string(),
        r"[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}".to_string(),
        r"[0-9]{4}/[0-9]{2}/[0-9]{2}".to_string(),
        format!(r"(?i)(?:{MONTHS})\s+[0-9]{{1,2}},?\s+[0-9]{{4}}"),
        format!(r"(?i)(?:{MONTHS_SHORT})\s+[0-9]{{1,2}},?\s+[0-9]{{4}}"),
    ])
});

/// Patterns tried against body text and then raw document text, in order.
pub static BODY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"[0-9]{4}-[0-9]{2}-[0-9]{2}".to_string(),
        r"[0-9]{2}/[0-9]{2}/[0-9]{4}".to_string(),
        r"[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}".to_string(),
        format!(r"(?i)(?:{MONTHS})\s+[0-9]{{1,2}},?\s+[0-9]{{4}}"),
        format!(r"(?i)(?:{MONTHS_SHORT})\s+[0-9]{{1,2}},?\s+[0-9]{{4}}"),
        format!(r"(?i)[0-9]{{1,2}}\s+(?:{MONTHS_SHORT})\s+[0-9]{{4}}"),
        format!(r"(?i)(?:{MONTHS_SHORT})\s+[0-9]{{1,2}},?\s+[0-9]{{4}}"),
        r"[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}".to_string(),
        r"[0-9]{1,2}-[0-9]{1,2}-[0-9]{4}".to_string(),
    ])
});

/// Return the match of the first pattern (in list order) that occurs in `text`.
#[must_use]
pub fn first_match<'t>(patterns: &[Regex], text: &'t str) -> Option<&'t str> {
    patterns
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str())
}

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%B %d %Y",
    "%d %B %Y",
];

/// Parse a date-like string leniently.
///
/// Accepts RFC 3339, RFC 2822, ISO date-times with or without offset, and
/// the date-only shapes matched by [`TITLE_PATTERNS`] / [`BODY_PATTERNS`].
/// Values without an offset are taken as UTC. Returns `None` for anything
/// that does not denote a real calendar instant (e.g. `02/30/2024`).
#[must_use]
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    // "January 5, 2024" -> "January 5 2024"
    let normalized = s.replace(',', " ").split_whitespace().collect::<Vec<_>>().join(" ");
    DATE_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(&normalized, fmt)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    })
}
