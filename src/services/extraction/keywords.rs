//! Keyword Tables
//!
//! Fixed, ordered keyword dictionaries driving type and module
//! classification. Represented as ordered slices rather than maps: the
//! module table is scanned first-match-wins in declared order, so
//! overlapping keywords ("user" vs "compliance") resolve to the earlier
//! entry. All matching is case-insensitive substring matching against
//! pre-lowercased text.

/// Issue-signal keywords, consulted before feature keywords. Any match
/// classifies the unit as an Issue even when feature keywords are also
/// present.
pub const ISSUE_KEYWORDS: &[&str] = &[
    "bug",
    "error",
    "crash",
    "broken",
    "deprecated",
    "vulnerable",
    "fail",
    "defect",
    "leak",
    "incorrect",
    "regression",
];

/// Feature-signal keywords.
pub const FEATURE_KEYWORDS: &[&str] = &[
    "feature",
    "implement",
    "dashboard",
    "component",
    "compliance",
    "config",
    "export",
    "button",
    "page",
    "chart",
    "report",
    "integration",
    "api",
    "workflow",
    "template",
    "upload",
    "search",
    "filter",
    "notification",
    "support",
];

/// Action verbs. Used as a classification tie-break when neither issue
/// nor feature keywords match, and for title pairing.
pub const ACTION_KEYWORDS: &[&str] = &[
    "create",
    "add",
    "build",
    "fix",
    "update",
    "setup",
    "develop",
    "design",
    "improve",
    "optimize",
    "refactor",
    "remove",
    "integrate",
    "migrate",
];

/// Fallback module label when no keyword matches.
pub const MODULE_OTHER: &str = "Other";

/// Module label → keyword list, scanned in declared order.
///
/// The order is a correctness requirement, not a style choice: iteration
/// stops at the first module with a matching keyword.
pub const MODULE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Compliance",
        &["compliance", "regulation", "regulatory", "audit", "policy", "gdpr"],
    ),
    (
        "User Management",
        &["user", "role", "permission", "account", "login", "auth", "profile"],
    ),
    (
        "Data Source",
        &["data source", "datasource", "connector", "etl", "ingestion", "import"],
    ),
    (
        "Configuration",
        &["config", "configuration", "setting", "parameter", "environment"],
    ),
    (
        "Content Management",
        &["content", "article", "document", "media", "cms"],
    ),
    (
        "Frontend",
        &["frontend", "front-end", "react", "vue", "page", "view"],
    ),
    (
        "Backend",
        &["backend", "back-end", "api", "service", "endpoint", "server"],
    ),
    (
        "Database",
        &["database", "sql", "schema", "table", "query", "index"],
    ),
    ("Testing", &["test", "testing", "qa", "coverage"]),
    (
        "Security",
        &["security", "encryption", "vulnerability", "xss", "csrf", "injection"],
    ),
    (
        "DevOps",
        &["devops", "deploy", "deployment", "ci/cd", "pipeline", "docker", "kubernetes"],
    ),
    ("UI/UX", &["ui", "ux", "design", "layout", "style", "usability"]),
];

/// First keyword in `keywords` that occurs in the (already lowercased)
/// text.
pub fn first_match(text_lower: &str, keywords: &[&'static str]) -> Option<&'static str> {
    keywords.iter().find(|kw| text_lower.contains(**kw)).copied()
}

/// Number of distinct keywords from `keywords` occurring in the text.
pub fn count_matches(text_lower: &str, keywords: &[&'static str]) -> usize {
    keywords.iter().filter(|kw| text_lower.contains(**kw)).count()
}
