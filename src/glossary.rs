//! Main word glossary.
//!
//! The store is a JSON object mapping main words either to a translation or
//! to an object of `identifier regex -> translation` pairs:
//!
//! ```json
//! {
//!     "Bronze": "青铜",
//!     "Casing": {
//!         "tile\\.blockCasing": "外壳",
//!         ".*": "套管"
//!     }
//! }
//! ```
//!
//! The `.*` key is a fallback and is never evaluated as a regex.

use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};

use indexmap::IndexMap;
use regex::Regex;
use serde::ser::Error as _;
use serde::{
    Deserialize,
    Serialize,
};

use crate::pattern::compile_anchored;

/// Submapping key reserved for the fallback translation.
pub const FALLBACK_KEY: &str = ".*";

#[derive(Debug, thiserror::Error)]
pub enum GlossaryError {
    #[error("Failed to read glossary '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse glossary: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Failed to serialize glossary: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write glossary '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// On-disk shape of a glossary value.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredValue {
    Direct(String),
    Contextual(IndexMap<String, String>),
}

/// Borrowed, sorted form written back on save.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum SavedValue<'a> {
    Direct(&'a str),
    Contextual(BTreeMap<&'a str, &'a str>),
}

/// An identifier-dependent translation.
#[derive(Debug, Clone)]
pub struct ContextRule {
    key: String,
    /// `None` when `key` is not a valid regex; such rules never match.
    matcher: Option<Regex>,
    translation: String,
}

impl ContextRule {
    #[must_use]
    pub fn new(key: impl Into<String>, translation: impl Into<String>) -> Self {
        let key = key.into();
        let matcher = match compile_anchored(&key) {
            Ok(regex) => Some(regex),
            Err(e) => {
                tracing::warn!("Glossary context '{}' is not a valid regex and is ignored: {}", key, e);
                None
            }
        };
        Self { key, matcher, translation: translation.into() }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn translation(&self) -> &str {
        &self.translation
    }

    fn matches(&self, context_key: &str) -> bool {
        self.matcher.as_ref().is_some_and(|regex| regex.is_match(context_key))
    }
}

/// Translation of one main word.
#[derive(Debug, Clone)]
pub enum GlossaryEntry {
    Direct(String),
    /// Rules are tried in stored order; `fallback` is used when none match.
    Contextual { rules: Vec<ContextRule>, fallback: Option<String> },
}

impl GlossaryEntry {
    /// Builds a contextual entry, moving a `.*` key into the fallback slot.
    pub fn contextual<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut rules = Vec::new();
        let mut fallback = None;
        for (key, translation) in pairs {
            let key = key.into();
            if key == FALLBACK_KEY {
                fallback = Some(translation.into());
            } else {
                rules.push(ContextRule::new(key, translation));
            }
        }
        Self::Contextual { rules, fallback }
    }

    /// Picks the translation for the entry identified by `context_key`.
    #[must_use]
    pub fn resolve(&self, context_key: &str) -> Option<&str> {
        match self {
            Self::Direct(translation) => Some(translation.as_str()),
            Self::Contextual { rules, fallback } => rules
                .iter()
                .find(|rule| rule.matches(context_key))
                .map(ContextRule::translation)
                .or(fallback.as_deref()),
        }
    }

    fn to_saved(&self) -> SavedValue<'_> {
        match self {
            Self::Direct(translation) => SavedValue::Direct(translation.as_str()),
            Self::Contextual { rules, fallback } => {
                let mut map: BTreeMap<&str, &str> =
                    rules.iter().map(|rule| (rule.key(), rule.translation())).collect();
                if let Some(fallback) = fallback {
                    map.insert(FALLBACK_KEY, fallback.as_str());
                }
                SavedValue::Contextual(map)
            }
        }
    }
}

impl From<StoredValue> for GlossaryEntry {
    fn from(value: StoredValue) -> Self {
        match value {
            StoredValue::Direct(translation) => Self::Direct(translation),
            StoredValue::Contextual(map) => Self::contextual(map),
        }
    }
}

/// Main word to translation lookup table.
#[derive(Debug, Clone, Default)]
pub struct Glossary {
    entries: BTreeMap<String, GlossaryEntry>,
}

impl Glossary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the glossary at `path`, recovering with an empty glossary.
    ///
    /// A missing file is the normal first-run case. Any other read or
    /// parse failure is logged as a warning.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("Glossary not found, starting empty: {:?}", path);
            return Self::new();
        }

        match Self::load(path) {
            Ok(glossary) => {
                tracing::debug!("Loaded {} glossary entries from {:?}", glossary.len(), path);
                glossary
            }
            Err(e) => {
                tracing::warn!("{e}; continuing with an empty glossary");
                Self::new()
            }
        }
    }

    /// # Errors
    /// Returns error if the file cannot be read or is not a valid glossary.
    pub fn load(path: &Path) -> Result<Self, GlossaryError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| GlossaryError::Read { path: path.to_path_buf(), source })?;
        Self::from_json_str(&content)
    }

    /// # Errors
    /// Returns error if `json` is not an object of strings or string objects.
    pub fn from_json_str(json: &str) -> Result<Self, GlossaryError> {
        let stored: IndexMap<String, StoredValue> =
            serde_json::from_str(json).map_err(GlossaryError::Parse)?;
        Ok(stored.into_iter().map(|(word, value)| (word, GlossaryEntry::from(value))).collect())
    }

    pub fn insert(&mut self, main_word: impl Into<String>, entry: GlossaryEntry) {
        self.entries.insert(main_word.into(), entry);
    }

    /// Translation of `main_word` for the entry identified by `context_key`.
    #[must_use]
    pub fn resolve(&self, main_word: &str, context_key: &str) -> Option<&str> {
        self.entries.get(main_word)?.resolve(context_key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pretty JSON with four-space indentation and keys sorted at every level.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_json_string(&self) -> Result<String, GlossaryError> {
        let saved: BTreeMap<&str, SavedValue<'_>> =
            self.entries.iter().map(|(word, entry)| (word.as_str(), entry.to_saved())).collect();

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        saved.serialize(&mut serializer).map_err(GlossaryError::Serialize)?;
        buf.push(b'\n');

        String::from_utf8(buf).map_err(|e| GlossaryError::Serialize(serde_json::Error::custom(e)))
    }

    /// # Errors
    /// Returns error if the glossary cannot be serialized or written.
    pub fn save(&self, path: &Path) -> Result<(), GlossaryError> {
        let json = self.to_json_string()?;
        Self::write_json(path, &json)?;
        tracing::debug!("Saved {} glossary entries to {:?}", self.len(), path);
        Ok(())
    }

    /// Writes glossary JSON produced by [`Glossary::to_json_string`].
    ///
    /// # Errors
    /// Returns error if the file cannot be written.
    pub fn write_json(path: &Path, json: &str) -> Result<(), GlossaryError> {
        std::fs::write(path, json)
            .map_err(|source| GlossaryError::Write { path: path.to_path_buf(), source })
    }
}

impl FromIterator<(String, GlossaryEntry)> for Glossary {
    fn from_iter<I: IntoIterator<Item = (String, GlossaryEntry)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}
