//! Entry records and the store that merges both lang files.

use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};

use crate::config::ReplacerSettings;

#[derive(Debug, thiserror::Error)]
pub enum LangFileError {
    #[error("Failed to read lang file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write lang file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which of the two input files a line was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LangSource {
    /// Source-language file.
    Original,
    /// Current, partially translated file.
    Translated,
}

/// One localization entry.
///
/// `final_target_value` starts out equal to `prior_target_value` and is
/// overwritten once by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub source_value: String,
    pub prior_target_value: String,
    pub final_target_value: String,
}

impl Entry {
    #[must_use]
    pub fn new(key: impl Into<String>, source_value: impl Into<String>) -> Self {
        Self { key: key.into(), source_value: source_value.into(), ..Self::default() }
    }

    /// Sets the previous translation, which is also the output until processed.
    #[must_use]
    pub fn with_prior_translation(mut self, value: impl Into<String>) -> Self {
        self.set_prior_translation(value.into());
        self
    }

    fn set_prior_translation(&mut self, value: String) {
        self.final_target_value.clone_from(&value);
        self.prior_target_value = value;
    }

    /// Entries that only exist in the translated file.
    #[must_use]
    pub const fn is_obsolete(&self) -> bool {
        self.source_value.is_empty()
    }
}

/// All entries of one run, keyed and ordered by identifier.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: BTreeMap<String, Entry>,
}

/// Splits an entry line into `(key, value)`.
///
/// The line is trimmed, must start with `marker`, and is split at the first
/// `=`. Anything else is not an entry line.
///
/// # Examples
/// ```
/// use lang_replacer::lang::parse_entry_line;
///
/// assert_eq!(parse_entry_line("    S:a.b=x=y", "S:"), Some(("a.b", "x=y")));
/// assert_eq!(parse_entry_line("languagefile {", "S:"), None);
/// ```
#[must_use]
pub fn parse_entry_line<'a>(line: &'a str, marker: &str) -> Option<(&'a str, &'a str)> {
    line.trim().strip_prefix(marker)?.split_once('=')
}

impl EntryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the original file, then the translated file, into one store.
    ///
    /// # Errors
    /// Returns error if either file cannot be read.
    pub fn load(
        original_path: &Path,
        translated_path: &Path,
        settings: &ReplacerSettings,
    ) -> Result<Self, LangFileError> {
        let mut store = Self::new();
        store.load_file(original_path, LangSource::Original, settings)?;
        store.load_file(translated_path, LangSource::Translated, settings)?;
        Ok(store)
    }

    fn load_file(
        &mut self,
        path: &Path,
        source: LangSource,
        settings: &ReplacerSettings,
    ) -> Result<(), LangFileError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| LangFileError::Read { path: path.to_path_buf(), source })?;

        let before = self.len();
        let read = self.ingest_str(&content, source, settings);
        tracing::debug!(
            "Loaded {:?} lang file {:?}: {} entry lines, {} new identifiers",
            source,
            path,
            read,
            self.len() - before
        );

        Ok(())
    }

    /// Merges the entry lines of `content` and returns how many were read.
    ///
    /// Lines that are not entry lines are ignored. A repeated identifier
    /// overwrites the earlier line from the same file.
    pub fn ingest_str(
        &mut self,
        content: &str,
        source: LangSource,
        settings: &ReplacerSettings,
    ) -> usize {
        let mut read = 0;
        for (key, value) in
            content.lines().filter_map(|line| parse_entry_line(line, &settings.entry_marker))
        {
            read += 1;
            match source {
                LangSource::Original => {
                    self.entries.insert(key.to_string(), Entry::new(key, value));
                }
                LangSource::Translated => {
                    if let Some(entry) = self.entries.get_mut(key) {
                        entry.set_prior_translation(value.to_string());
                    } else if settings.delete_obsolete_items {
                        tracing::debug!("Dropping obsolete entry: {}", key);
                    } else {
                        self.entries.insert(
                            key.to_string(),
                            Entry::new(key, "").with_prior_translation(value),
                        );
                    }
                }
            }
        }
        read
    }

    pub fn insert(&mut self, entry: Entry) {
        self.entries.insert(entry.key.clone(), entry);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Entries in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entry> {
        self.entries.values_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
