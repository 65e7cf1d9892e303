use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Marker that introduces an entry line in a lang file (`S:key=value`).
pub const DEFAULT_ENTRY_MARKER: &str = "S:";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "entryMarker")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Policies that steer how entries are merged and translated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ReplacerSettings {
    /// Drop identifiers that only exist in the translated file.
    pub delete_obsolete_items: bool,

    /// Keep a non-empty prior translation instead of the processed one.
    pub respect_translated: bool,

    /// Use the untranslated main word when the glossary has no entry for it.
    ///
    /// The result keeps source-language text embedded in the wrapper
    /// translation (e.g. `Tungstensteel 机器外壳`).
    pub allow_partial_translation: bool,

    /// Prefix of entry lines, both when reading and writing lang files.
    pub entry_marker: String,
}

impl Default for ReplacerSettings {
    fn default() -> Self {
        Self {
            delete_obsolete_items: false,
            respect_translated: false,
            allow_partial_translation: false,
            entry_marker: DEFAULT_ENTRY_MARKER.to_string(),
        }
    }
}

impl ReplacerSettings {
    /// # Errors
    /// - Entry marker is empty
    /// - Entry marker contains `=` or whitespace
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.entry_marker.is_empty() {
            errors.push(ValidationError::new(
                "entryMarker",
                "The marker cannot be empty. Please specify a marker, for example: \"S:\"",
            ));
        }

        if self.entry_marker.contains('=') {
            errors.push(ValidationError::new(
                "entryMarker",
                format!(
                    "Invalid marker '{}': '=' separates keys from values and cannot be part of the marker",
                    self.entry_marker
                ),
            ));
        }

        if self.entry_marker.chars().any(char::is_whitespace) {
            errors.push(ValidationError::new(
                "entryMarker",
                format!(
                    "Invalid marker '{}': lines are trimmed before matching, so whitespace never matches",
                    self.entry_marker
                ),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
