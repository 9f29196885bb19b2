//! The closed set of article categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An article category. The set is closed; [`Category::General`] is the
/// fallback for titles that match no rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "APIs")]
    Apis,
    Database,
    Microservices,
    Architecture,
    DevOps,
    Security,
    Networking,
    Testing,
    #[serde(rename = "Machine Learning")]
    MachineLearning,
    Career,
    #[serde(rename = "Open Source")]
    OpenSource,
    #[serde(rename = "Best Practices")]
    BestPractices,
    Scalability,
    #[serde(rename = "Cloud Computing")]
    CloudComputing,
    #[serde(rename = "Interview Prep")]
    InterviewPrep,
    General,
}

impl Category {
    /// Every category, in classifier priority order (`General` last).
    pub const ALL: [Category; 16] = [
        Category::Apis,
        Category::Database,
        Category::Microservices,
        Category::Architecture,
        Category::DevOps,
        Category::Security,
        Category::Networking,
        Category::Testing,
        Category::MachineLearning,
        Category::Career,
        Category::OpenSource,
        Category::BestPractices,
        Category::Scalability,
        Category::CloudComputing,
        Category::InterviewPrep,
        Category::General,
    ];

    /// Human-readable label, also used for exact-match category filtering.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Apis => "APIs",
            Category::Database => "Database",
            Category::Microservices => "Microservices",
            Category::Architecture => "Architecture",
            Category::DevOps => "DevOps",
            Category::Security => "Security",
            Category::Networking => "Networking",
            Category::Testing => "Testing",
            Category::MachineLearning => "Machine Learning",
            Category::Career => "Career",
            Category::OpenSource => "Open Source",
            Category::BestPractices => "Best Practices",
            Category::Scalability => "Scalability",
            Category::CloudComputing => "Cloud Computing",
            Category::InterviewPrep => "Interview Prep",
            Category::General => "General",
        }
    }

    /// Icon shown next to a category group header.
    #[must_use]
    pub fn header_icon(self) -> &'static str {
        match self {
            Category::Apis => "fa-plug",
            Category::Database => "fa-database",
            Category::Microservices => "fa-sitemap",
            Category::Architecture => "fa-building",
            Category::DevOps => "fa-sync-alt",
            Category::Security => "fa-shield-alt",
            Category::Networking => "fa-network-wired",
            Category::Testing => "fa-bug",
            Category::MachineLearning => "fa-brain",
            Category::Career => "fa-user-tie",
            Category::OpenSource => "fa-globe",
            Category::BestPractices => "fa-code",
            Category::Scalability => "fa-chart-line",
            Category::CloudComputing => "fa-cloud",
            Category::InterviewPrep => "fa-question-circle",
            Category::General => "fa-file-alt",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Parses an exact category label (`"Machine Learning"`, `"APIs"`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label() == s)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_roundtrip_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.label().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn from_str_is_exact() {
        assert!("apis".parse::<Category>().is_err());
        assert!("Machine  Learning".parse::<Category>().is_err());
    }

    #[test]
    fn serde_uses_labels() {
        let json = serde_json::to_string(&Category::MachineLearning).unwrap();
        assert_eq!(json, "\"Machine Learning\"");
        let back: Category = serde_json::from_str("\"APIs\"").unwrap();
        assert_eq!(back, Category::Apis);
    }

    #[test]
    fn every_category_has_a_header_icon() {
        for category in Category::ALL {
            assert!(category.header_icon().starts_with("fa-"));
        }
        assert_eq!(Category::Career.header_icon(), "fa-user-tie");
    }
}
