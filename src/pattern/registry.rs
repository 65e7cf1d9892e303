//! Ordered rule collection and its JSON rule file.

use std::cmp::Reverse;
use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};

use super::{
    Pattern,
    RuleError,
};

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("Failed to read pattern file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse pattern file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid pattern rule #{index}: {source}")]
    InvalidRule {
        index: usize,
        #[source]
        source: RuleError,
    },
}

/// One record of the rule file.
///
/// ```json
/// { "name": "tile\\.blockCasing", "value": "(.+) Machine Casing$", "repl": "{0} 机器外壳", "priority": 1 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PatternRule {
    #[serde(rename = "name", alias = "keyMatcher")]
    pub key_matcher: String,
    #[serde(rename = "value", alias = "valueMatcher")]
    pub value_matcher: String,
    #[serde(rename = "repl", alias = "replacement")]
    pub replacement: String,
    pub priority: i32,
}

impl TryFrom<&PatternRule> for Pattern {
    type Error = RuleError;

    fn try_from(rule: &PatternRule) -> Result<Self, Self::Error> {
        Ok(Self::new(&rule.key_matcher, &rule.value_matcher, &rule.replacement)?
            .with_priority(rule.priority))
    }
}

/// Rules in insertion order. Insertion order breaks priority ties.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    patterns: Vec<Pattern>,
}

impl PatternRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a registry from a rule file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed, or any rule is invalid.
    pub fn load(path: &Path) -> Result<Self, PatternError> {
        let mut registry = Self::new();
        registry.load_file(path)?;
        Ok(registry)
    }

    /// Appends every rule of the file at `path`.
    ///
    /// Nothing is appended if any rule fails to compile.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed, or any rule is invalid.
    pub fn load_file(&mut self, path: &Path) -> Result<usize, PatternError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| PatternError::Read { path: path.to_path_buf(), source })?;
        let rules: Vec<PatternRule> = serde_json::from_str(&content)
            .map_err(|source| PatternError::Parse { path: path.to_path_buf(), source })?;

        let added = self.extend_from_rules(&rules)?;
        tracing::debug!("Loaded {} pattern rules from {:?}", added, path);
        Ok(added)
    }

    /// Compiles and appends `rules` in order.
    ///
    /// # Errors
    /// Returns the first invalid rule, with its index in `rules`.
    pub fn extend_from_rules(&mut self, rules: &[PatternRule]) -> Result<usize, PatternError> {
        let compiled = rules
            .iter()
            .enumerate()
            .map(|(index, rule)| {
                Pattern::try_from(rule).map_err(|source| PatternError::InvalidRule { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let added = compiled.len();
        self.patterns.extend(compiled);
        Ok(added)
    }

    pub fn push(&mut self, pattern: Pattern) {
        self.patterns.push(pattern);
    }

    /// Rules whose key matcher matches `key`, highest priority first.
    ///
    /// Equal priorities keep insertion order.
    #[must_use]
    pub fn candidates(&self, key: &str) -> Vec<&Pattern> {
        let mut candidates: Vec<&Pattern> =
            self.patterns.iter().filter(|pattern| pattern.applies_to(key)).collect();
        // sort_by_key is stable
        candidates.sort_by_key(|pattern| Reverse(pattern.priority()));
        candidates
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl FromIterator<Pattern> for PatternRegistry {
    fn from_iter<I: IntoIterator<Item = Pattern>>(iter: I) -> Self {
        Self { patterns: iter.into_iter().collect() }
    }
}
