//! Client-side validation of user form values.
//!
//! Each field has its own validator returning the rules it violates; the
//! record validator runs all of them and collects the results into a
//! [`Violations`] set. An empty set means the form may be submitted.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use crate::models::{UserFields, UserStatus};

pub const NAME_MAX_LEN: usize = 50;
pub const EMAIL_MAX_LEN: usize = 100;
pub const DEPARTMENT_MAX_LEN: usize = 50;

const EMAIL_TOTAL_MAX: usize = 254;
const EMAIL_LOCAL_MAX: usize = 64;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

/// Editable form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    UserName,
    FirstName,
    LastName,
    Email,
    UserStatus,
    Department,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::UserName,
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::UserStatus,
        Field::Department,
    ];

    /// JSON / form control name
    pub fn name(&self) -> &'static str {
        match self {
            Field::UserName => "user_name",
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::Email => "email",
            Field::UserStatus => "user_status",
            Field::Department => "department",
        }
    }

    pub fn value<'a>(&self, fields: &'a UserFields) -> &'a str {
        match self {
            Field::UserName => &fields.user_name,
            Field::FirstName => &fields.first_name,
            Field::LastName => &fields.last_name,
            Field::Email => &fields.email,
            Field::UserStatus => &fields.user_status,
            Field::Department => &fields.department,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A constraint a field value can break
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "rule", content = "limit", rename_all = "snake_case")]
pub enum Rule {
    Required,
    MaxLength(usize),
    Email,
    Pattern,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => f.write_str("is required"),
            Rule::MaxLength(max) => write!(f, "must be at most {} characters", max),
            Rule::Email => f.write_str("must be a valid email address"),
            Rule::Pattern => f.write_str("must be one of A, I, T"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Violation {
    pub field: Field,
    pub rule: Rule,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.rule)
    }
}

/// Ordered set of violated constraints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(BTreeSet<Violation>);

impl Violations {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn insert(&mut self, violation: Violation) -> bool {
        self.0.insert(violation)
    }

    pub fn contains(&self, field: Field, rule: Rule) -> bool {
        self.0.contains(&Violation { field, rule })
    }

    /// True if any rule on `field` is violated
    pub fn has_field(&self, field: Field) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    fn extend(&mut self, field: Field, rules: Vec<Rule>) {
        self.0
            .extend(rules.into_iter().map(|rule| Violation { field, rule }));
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for Violations {}

fn required(value: &str) -> Option<Rule> {
    value.is_empty().then_some(Rule::Required)
}

fn max_length(value: &str, max: usize) -> Option<Rule> {
    (value.chars().count() > max).then_some(Rule::MaxLength(max))
}

/// Required text field with a length limit (user_name, first/last name, department)
pub fn validate_text(value: &str, max: usize) -> Vec<Rule> {
    [required(value), max_length(value, max)]
        .into_iter()
        .flatten()
        .collect()
}

/// Syntax check only; an empty value is left to the required rule.
pub fn is_valid_email(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    if value.len() > EMAIL_TOTAL_MAX {
        return false;
    }
    match value.split_once('@') {
        Some((local, _)) if local.len() <= EMAIL_LOCAL_MAX => EMAIL_RE.is_match(value),
        _ => false,
    }
}

pub fn validate_email(value: &str) -> Vec<Rule> {
    let syntax = (!is_valid_email(value)).then_some(Rule::Email);
    [required(value), syntax, max_length(value, EMAIL_MAX_LEN)]
        .into_iter()
        .flatten()
        .collect()
}

/// The status must be exactly one of the known codes
pub fn validate_status(value: &str) -> Vec<Rule> {
    let pattern =
        (!value.is_empty() && value.parse::<UserStatus>().is_err()).then_some(Rule::Pattern);
    [required(value), pattern].into_iter().flatten().collect()
}

/// Run every field validator and collect what failed
pub fn validate_fields(fields: &UserFields) -> Violations {
    let mut violations = Violations::default();
    violations.extend(Field::UserName, validate_text(&fields.user_name, NAME_MAX_LEN));
    violations.extend(Field::FirstName, validate_text(&fields.first_name, NAME_MAX_LEN));
    violations.extend(Field::LastName, validate_text(&fields.last_name, NAME_MAX_LEN));
    violations.extend(Field::Email, validate_email(&fields.email));
    violations.extend(Field::UserStatus, validate_status(&fields.user_status));
    violations.extend(
        Field::Department,
        validate_text(&fields.department, DEPARTMENT_MAX_LEN),
    );
    violations
}
