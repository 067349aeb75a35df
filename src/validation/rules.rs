//! Field rules
//!
//! A rule inspects one (already normalized) string value and either passes
//! or names the message key to report. Absent values only fail `Required`.

use regex::Regex;
use std::sync::{Arc, LazyLock};

// ============================================================================
// Message Keys
// ============================================================================

/// Required field is missing or empty
pub const EMPTY_ERROR: &str = "form.empty.error";

/// Value has the wrong JSON type for its field
pub const TYPE_ERROR: &str = "form.type.error";

/// Value is not a well-formed email address
pub const EMAIL_ERROR: &str = "form.email.error";

/// Value is not an absolute http(s) URL
pub const URL_ERROR: &str = "form.url.error";

/// Value is not one of the allowed options
pub const OPTION_ERROR: &str = "form.option.invalid";

/// Path does not name a field the schema declares
pub const UNKNOWN_PATH: &str = "form.path.unknown";

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Custom predicate over a string value
pub type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// A single validation rule attached to a string field
#[derive(Clone)]
pub enum Rule {
    /// Value must be present and non-empty
    Required { message: String },
    /// Value must have at least `min` characters
    MinLength { min: usize, message: String },
    /// Value must match the pattern
    Matches { pattern: Regex, message: String },
    /// Value must look like an email address (empty passes)
    Email { message: String },
    /// Value must parse as an absolute http(s) URL (empty passes)
    Url { message: String },
    /// Value must be one of the allowed strings
    OneOf {
        allowed: Vec<String>,
        message: String,
    },
    /// Named custom predicate
    Test {
        name: String,
        message: String,
        predicate: Predicate,
    },
}

impl Rule {
    /// Name of the rule, used in logs
    pub fn name(&self) -> &str {
        match self {
            Rule::Required { .. } => "required",
            Rule::MinLength { .. } => "min",
            Rule::Matches { .. } => "matches",
            Rule::Email { .. } => "email",
            Rule::Url { .. } => "url",
            Rule::OneOf { .. } => "oneOf",
            Rule::Test { name, .. } => name,
        }
    }

    /// Message key reported when this rule fails
    pub fn message(&self) -> &str {
        match self {
            Rule::Required { message }
            | Rule::MinLength { message, .. }
            | Rule::Matches { message, .. }
            | Rule::Email { message }
            | Rule::Url { message }
            | Rule::OneOf { message, .. }
            | Rule::Test { message, .. } => message,
        }
    }

    /// Check a value against this rule
    pub fn check(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return !matches!(self, Rule::Required { .. });
        };

        match self {
            Rule::Required { .. } => !value.is_empty(),
            Rule::MinLength { min, .. } => value.chars().count() >= *min,
            Rule::Matches { pattern, .. } => pattern.is_match(value),
            Rule::Email { .. } => value.is_empty() || EMAIL_REGEX.is_match(value),
            Rule::Url { .. } => value.is_empty() || is_http_url(value),
            Rule::OneOf { allowed, .. } => allowed.iter().any(|a| a == value),
            Rule::Test { predicate, .. } => predicate(value),
        }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name())
            .field("message", &self.message())
            .finish()
    }
}

/// Check if a string is an absolute http or https URL
fn is_http_url(value: &str) -> bool {
    url::Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false)
}

#[cfg(test)]
mod rule_tests {
    use super::*;

    fn required() -> Rule {
        Rule::Required {
            message: EMPTY_ERROR.to_string(),
        }
    }

    #[test]
    fn test_absent_only_fails_required() {
        assert!(!required().check(None));
        assert!(Rule::Email {
            message: EMAIL_ERROR.to_string()
        }
        .check(None));
        assert!(Rule::MinLength {
            min: 3,
            message: "short".to_string()
        }
        .check(None));
    }

    #[test]
    fn test_required_rejects_empty() {
        assert!(!required().check(Some("")));
        assert!(required().check(Some("x")));
    }

    #[test]
    fn test_email_and_url_pass_empty() {
        let email = Rule::Email {
            message: EMAIL_ERROR.to_string(),
        };
        assert!(email.check(Some("")));
        assert!(email.check(Some("user@example.com")));
        assert!(!email.check(Some("user@example")));
        assert!(!email.check(Some("not an email")));

        let url = Rule::Url {
            message: URL_ERROR.to_string(),
        };
        assert!(url.check(Some("")));
        assert!(url.check(Some("https://hooks.example.com/run")));
        assert!(!url.check(Some("ftp://example.com")));
        assert!(!url.check(Some("/relative/path")));
    }

    #[test]
    fn test_custom_predicate() {
        let rule = Rule::Test {
            name: "noSpaces".to_string(),
            message: "form.spaces".to_string(),
            predicate: Arc::new(|v| !v.contains(' ')),
        };
        assert_eq!(rule.name(), "noSpaces");
        assert_eq!(rule.message(), "form.spaces");
        assert!(rule.check(Some("abc")));
        assert!(!rule.check(Some("a b")));
    }
}
