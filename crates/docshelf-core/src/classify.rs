//! Keyword classifier: category, icon, and description for an article title.
//!
//! Each table is an ordered list of rules. A rule matches when any of its
//! keywords is a substring of the lower-cased title; the first matching rule
//! wins. Keyword sets overlap on purpose ("interview" appears in both the
//! Microservices and Interview Prep rules), so table order is significant.

use crate::category::Category;

/// One row of a classifier table.
#[derive(Debug, Clone, Copy)]
pub struct Rule<T: 'static> {
    pub keywords: &'static [&'static str],
    pub result: T,
}

impl<T> Rule<T> {
    /// Returns `true` if any keyword occurs in `title_lower`.
    #[must_use]
    pub fn matches(&self, title_lower: &str) -> bool {
        self.keywords.iter().any(|k| title_lower.contains(k))
    }
}

/// Evaluate `rules` top to bottom and return the first match's result.
pub fn first_match<T: Copy>(rules: &[Rule<T>], title_lower: &str) -> Option<T> {
    rules
        .iter()
        .find(|rule| rule.matches(title_lower))
        .map(|rule| rule.result)
}

pub const CATEGORY_RULES: &[Rule<Category>] = &[
    Rule {
        keywords: &[
            "api",
            "rest",
            "graphql",
            "idempotency",
            "authentication",
            "rate limiting",
            "protocols",
        ],
        result: Category::Apis,
    },
    Rule {
        keywords: &[
            "database",
            "sql",
            "sharding",
            "performance",
            "caching",
            "indexing",
            "replication",
            "transactions",
            "nosql",
            "redis",
        ],
        result: Category::Database,
    },
    Rule {
        keywords: &[
            "microservice",
            "distributed",
            "monolith",
            "data sharing",
            "interview",
        ],
        result: Category::Microservices,
    },
    Rule {
        keywords: &[
            "architecture",
            "scaling",
            "design pattern",
            "clean architecture",
            "cqrs",
            "event-driven",
            "sidecar",
            "stateless",
            "cap",
            "acid",
            "base",
            "solid",
            "oop",
            "coupling",
            "cohesion",
            "ddd",
            "domain-driven",
        ],
        result: Category::Architecture,
    },
    Rule {
        keywords: &[
            "devops",
            "cicd",
            "infrastructure",
            "kubernetes",
            "container",
            "docker",
            "production",
            "shipping",
        ],
        result: Category::DevOps,
    },
    Rule {
        keywords: &[
            "security", "gateway", "password", "session", "cookie", "token", "jwt", "sso", "oauth",
        ],
        result: Category::Security,
    },
    Rule {
        keywords: &[
            "networking",
            "http",
            "ipv4",
            "latency",
            "message queue",
            "tcp",
            "dns",
            "protocol",
            "kafka",
            "rabbitmq",
        ],
        result: Category::Networking,
    },
    Rule {
        keywords: &["testing", "chaos", "resilience", "failure", "reliability"],
        result: Category::Testing,
    },
    Rule {
        keywords: &[
            "machine learning",
            "recommendation",
            "algorithm",
            "ai",
            "chatbot",
            "langchain",
        ],
        result: Category::MachineLearning,
    },
    Rule {
        keywords: &[
            "career",
            "resume",
            "job",
            "staff engineer",
            "executives",
            "promotion",
            "under leveled",
            "speedrunning",
        ],
        result: Category::Career,
    },
    Rule {
        keywords: &["open source", "project"],
        result: Category::OpenSource,
    },
    Rule {
        keywords: &[
            "code",
            "tidying",
            "best practice",
            "non-functional",
            "good code",
            "bad code",
        ],
        result: Category::BestPractices,
    },
    Rule {
        keywords: &[
            "scaling",
            "netflix",
            "load balancer",
            "capacity planning",
            "hashing",
            "leader election",
        ],
        result: Category::Scalability,
    },
    Rule {
        keywords: &["serverless", "cloud", "virtualization", "containerization"],
        result: Category::CloudComputing,
    },
    Rule {
        keywords: &["interview", "questions"],
        result: Category::InterviewPrep,
    },
];

pub const DEFAULT_ICON: &str = "fas fa-file-alt";

pub const ICON_RULES: &[Rule<&str>] = &[
    Rule {
        keywords: &["api", "rest", "graphql"],
        result: "fas fa-plug",
    },
    Rule {
        keywords: &["database", "sql"],
        result: "fas fa-database",
    },
    Rule {
        keywords: &["microservice", "distributed"],
        result: "fas fa-sitemap",
    },
    Rule {
        keywords: &["architecture", "scaling"],
        result: "fas fa-building",
    },
    Rule {
        keywords: &["devops", "cicd"],
        result: "fas fa-sync-alt",
    },
    Rule {
        keywords: &["security"],
        result: "fas fa-shield-alt",
    },
    Rule {
        keywords: &["networking", "http"],
        result: "fas fa-network-wired",
    },
    Rule {
        keywords: &["testing", "chaos"],
        result: "fas fa-bug",
    },
    Rule {
        keywords: &["machine learning", "recommendation"],
        result: "fas fa-brain",
    },
    Rule {
        keywords: &["career", "resume"],
        result: "fas fa-file-alt",
    },
    Rule {
        keywords: &["open source", "project"],
        result: "fas fa-globe",
    },
    Rule {
        keywords: &["code", "tidying"],
        result: "fas fa-code",
    },
];

/// Description produced by a description rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Description {
    /// A fixed sentence.
    Fixed(&'static str),
    /// "A comprehensive crash course ... in {topic}." where the topic is the
    /// title with its "A Crash Course in/on" prefix removed.
    CrashCourse,
}

impl Description {
    /// Render the description for `title`.
    #[must_use]
    pub fn render(self, title: &str) -> String {
        match self {
            Description::Fixed(text) => text.to_string(),
            Description::CrashCourse => {
                let topic = title
                    .replacen("A Crash Course in ", "", 1)
                    .replacen("A Crash Course on ", "", 1);
                format!(
                    "A comprehensive crash course covering essential concepts and best practices in {topic}."
                )
            }
        }
    }
}

pub const DEFAULT_DESCRIPTION: &str =
    "A comprehensive guide covering important concepts and best practices in software development.";

pub const DESCRIPTION_RULES: &[Rule<Description>] = &[
    Rule {
        keywords: &["crash course"],
        result: Description::CrashCourse,
    },
    Rule {
        keywords: &["scaling"],
        result: Description::Fixed(
            "Learn effective strategies and techniques for scaling systems and applications to handle growing demands.",
        ),
    },
    Rule {
        keywords: &["api"],
        result: Description::Fixed(
            "Essential guide to API design, implementation, and best practices for building robust and scalable APIs.",
        ),
    },
    Rule {
        keywords: &["database"],
        result: Description::Fixed(
            "Comprehensive coverage of database concepts, design principles, and optimization techniques.",
        ),
    },
    Rule {
        keywords: &["architecture"],
        result: Description::Fixed(
            "Explore architectural patterns and design principles for building scalable and maintainable systems.",
        ),
    },
    Rule {
        keywords: &["security"],
        result: Description::Fixed(
            "Important security considerations and best practices for protecting applications and data.",
        ),
    },
    Rule {
        keywords: &["networking"],
        result: Description::Fixed(
            "Understanding networking fundamentals and protocols for modern applications.",
        ),
    },
    Rule {
        keywords: &["devops"],
        result: Description::Fixed(
            "DevOps practices and tools for modern software development and deployment.",
        ),
    },
    Rule {
        keywords: &["microservice"],
        result: Description::Fixed(
            "Microservice architecture patterns and implementation strategies for distributed systems.",
        ),
    },
    Rule {
        keywords: &["testing"],
        result: Description::Fixed(
            "Testing strategies and techniques for ensuring software quality and reliability.",
        ),
    },
    Rule {
        keywords: &["career"],
        result: Description::Fixed(
            "Career development tips and strategies for software professionals.",
        ),
    },
    Rule {
        keywords: &["open source"],
        result: Description::Fixed(
            "Explore influential open-source projects and their impact on the technology landscape.",
        ),
    },
];

/// Assign a category to a title. Total: falls back to [`Category::General`].
#[must_use]
pub fn categorize(title: &str) -> Category {
    first_match(CATEGORY_RULES, &title.to_lowercase()).unwrap_or(Category::General)
}

/// Pick the card icon for a title. Total: falls back to [`DEFAULT_ICON`].
#[must_use]
pub fn icon_for(title: &str) -> &'static str {
    first_match(ICON_RULES, &title.to_lowercase()).unwrap_or(DEFAULT_ICON)
}

/// Generate the card description for a title.
#[must_use]
pub fn describe(title: &str) -> String {
    match first_match(DESCRIPTION_RULES, &title.to_lowercase()) {
        Some(description) => description.render(title),
        None => DEFAULT_DESCRIPTION.to_string(),
    }
}

/// Category and icon for a title in one pass.
#[must_use]
pub fn classify(title: &str) -> (Category, &'static str) {
    let lower = title.to_lowercase();
    let category = first_match(CATEGORY_RULES, &lower).unwrap_or(Category::General);
    let icon = first_match(ICON_RULES, &lower).unwrap_or(DEFAULT_ICON);
    (category, icon)
}
