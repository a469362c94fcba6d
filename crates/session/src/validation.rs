//! Registration form validation
//!
//! One declarative rule set shared by every caller, replacing per-form
//! copies of the same checks. The UI layer renders the issues; the session
//! layer refuses to send a registration that violates them.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use paws_http::types::RegisterRequest;

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"));

/// A single declarative check applied to a field value
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    NonEmpty,
    MinLength(usize),
    Email,
}

/// Rules applied to one registration field
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: &'static str,
    pub rules: &'static [Rule],
}

/// The registration rule set. Single source of truth for password and
/// email requirements.
pub const REGISTRATION_RULES: &[FieldRules] = &[
    FieldRules { field: "username", rules: &[Rule::NonEmpty] },
    FieldRules { field: "email", rules: &[Rule::NonEmpty, Rule::Email] },
    FieldRules { field: "password", rules: &[Rule::MinLength(MIN_PASSWORD_LEN)] },
];

/// A rule violation, addressed to a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn check(rule: Rule, value: &str) -> Option<String> {
    match rule {
        Rule::NonEmpty => value
            .trim()
            .is_empty()
            .then(|| "cannot be empty".to_string()),
        Rule::MinLength(min) => (value.chars().count() < min)
            .then(|| format!("must be at least {min} characters long")),
        Rule::Email => (!EMAIL_RE.is_match(value)).then(|| "invalid email format".to_string()),
    }
}

/// Apply the registration rule set, collecting every violation
pub fn validate_registration(payload: &RegisterRequest) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for field_rules in REGISTRATION_RULES {
        let value = match field_rules.field {
            "username" => &payload.username,
            "email" => &payload.email,
            "password" => &payload.password,
            _ => continue,
        };

        for rule in field_rules.rules {
            if let Some(message) = check(*rule, value) {
                issues.push(ValidationIssue {
                    field: field_rules.field,
                    message,
                });
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> RegisterRequest {
        RegisterRequest {
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "longenough".to_string(),
            display_name: None,
        }
    }

    #[test]
    fn accepts_well_formed_registration() {
        assert!(validate_registration(&payload()).is_empty());
    }

    #[test]
    fn rejects_short_password() {
        let mut p = payload();
        p.password = "short".to_string();

        let issues = validate_registration(&p);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "password");
        assert_eq!(issues[0].message, "must be at least 8 characters long");
    }

    #[test]
    fn rejects_malformed_email() {
        for bad in ["nope", "a@b", "two@@example.com", "sp ace@example.com"] {
            let mut p = payload();
            p.email = bad.to_string();
            assert!(
                validate_registration(&p)
                    .iter()
                    .any(|issue| issue.field == "email"),
                "expected email issue for {bad:?}"
            );
        }
    }

    #[test]
    fn collects_every_violation_at_once() {
        let p = RegisterRequest {
            username: "  ".to_string(),
            email: String::new(),
            password: "short".to_string(),
            display_name: None,
        };

        let issues = validate_registration(&p);
        let fields: Vec<_> = issues.iter().map(|i| i.field).collect();
        assert!(fields.contains(&"username"));
        assert!(fields.contains(&"email"));
        assert!(fields.contains(&"password"));
    }
}
