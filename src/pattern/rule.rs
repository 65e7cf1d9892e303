//! A single wrapper rule.

use std::fmt;

use regex::Regex;

use super::{
    Template,
    TemplateError,
};

/// Which matcher of a rule a compile error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternField {
    /// Matched against the entry identifier.
    Key,
    /// Matched against the entry value; strips the wrapper.
    Value,
}

impl fmt::Display for PatternField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key => f.write_str("name"),
            Self::Value => f.write_str("value"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Invalid regex in '{field}' field '{pattern}': {source}")]
    RegexCompile {
        field: PatternField,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Value matcher '{pattern}' must define exactly one capture group, found {found}")]
    CaptureGroupCount { pattern: String, found: usize },

    #[error("Invalid replacement template '{template}': {source}")]
    Template {
        template: String,
        #[source]
        source: TemplateError,
    },
}

/// Decomposition rule.
///
/// Both matchers are anchored at the start of the text only, so
/// `tile\.` matches every identifier beginning with `tile.`.
#[derive(Debug, Clone)]
pub struct Pattern {
    key_matcher: Regex,
    key_source: String,
    value_matcher: Regex,
    value_source: String,
    replacement: Template,
    priority: i32,
}

/// Compiles `pattern` so it only matches at the start of the haystack.
///
/// `pattern` must be valid on its own; an unbalanced `)` would otherwise
/// close the anchoring group and leave later branches unanchored.
pub(crate) fn compile_anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(pattern)?;
    Regex::new(&format!("^(?:{pattern})"))
}

impl Pattern {
    pub const DEFAULT_PRIORITY: i32 = -1;

    /// Builds a rule with [`Pattern::DEFAULT_PRIORITY`].
    ///
    /// # Errors
    /// - Either matcher is not a valid regex
    /// - The value matcher does not have exactly one capture group
    /// - The replacement template is malformed
    pub fn new(key_matcher: &str, value_matcher: &str, replacement: &str) -> Result<Self, RuleError> {
        let key_regex = compile_anchored(key_matcher).map_err(|source| RuleError::RegexCompile {
            field: PatternField::Key,
            pattern: key_matcher.to_string(),
            source,
        })?;
        let value_regex =
            compile_anchored(value_matcher).map_err(|source| RuleError::RegexCompile {
                field: PatternField::Value,
                pattern: value_matcher.to_string(),
                source,
            })?;

        // captures_len counts the implicit whole-match group.
        let found = value_regex.captures_len() - 1;
        if found != 1 {
            return Err(RuleError::CaptureGroupCount { pattern: value_matcher.to_string(), found });
        }

        let template = Template::parse(replacement).map_err(|source| RuleError::Template {
            template: replacement.to_string(),
            source,
        })?;

        Ok(Self {
            key_matcher: key_regex,
            key_source: key_matcher.to_string(),
            value_matcher: value_regex,
            value_source: value_matcher.to_string(),
            replacement: template,
            priority: Self::DEFAULT_PRIORITY,
        })
    }

    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    #[must_use]
    pub fn key_matcher(&self) -> &str {
        &self.key_source
    }

    #[must_use]
    pub fn value_matcher(&self) -> &str {
        &self.value_source
    }

    #[must_use]
    pub const fn replacement(&self) -> &Template {
        &self.replacement
    }

    /// Whether this rule applies to the entry `key`.
    #[must_use]
    pub fn applies_to(&self, key: &str) -> bool {
        self.key_matcher.is_match(key)
    }

    /// Strips this wrapper from `value`, returning the captured remainder.
    ///
    /// Returns `None` when the value matcher does not match, or when its
    /// capture group did not take part in the match.
    #[must_use]
    pub fn strip<'a>(&self, value: &'a str) -> Option<&'a str> {
        self.value_matcher.captures(value)?.get(1).map(|m| m.as_str())
    }

    /// Puts the wrapper back around an already translated `inner` value.
    #[must_use]
    pub fn wrap(&self, inner: &str) -> String {
        self.replacement.apply(inner)
    }
}
