//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ReplacerSettings;

/// Regex-based auto translator for GregTech style lang files.
#[derive(Parser, Debug, Clone)]
#[command(name = "lang-replacer", version)]
pub struct Cli {
    /// Currently translated lang file.
    #[arg(value_name = "TRANSLATED")]
    pub translated: PathBuf,
    /// Original (source-language) lang file.
    #[arg(value_name = "ORIGINAL")]
    pub original: PathBuf,
    /// Glossary JSON, created if it does not exist.
    #[arg(value_name = "GLOSSARY")]
    pub glossary: PathBuf,
    /// Pattern rule JSON.
    #[arg(value_name = "PATTERN")]
    pub pattern: PathBuf,
    /// Lang file to write.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
    /// Settings file; defaults to `.lang-replacer.json` in the working directory.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Keep existing translations instead of the processed ones.
    #[arg(long)]
    pub respect_translated: bool,
    /// Use untranslated main words when the glossary has no entry.
    #[arg(long)]
    pub allow_partial_translation: bool,
    /// Drop entries that only exist in the translated file.
    #[arg(long)]
    pub delete_obsolete: bool,
}

impl Cli {
    /// Switches on every policy flag given on the command line.
    pub fn apply_overrides(&self, settings: &mut ReplacerSettings) {
        settings.respect_translated |= self.respect_translated;
        settings.allow_partial_translation |= self.allow_partial_translation;
        settings.delete_obsolete_items |= self.delete_obsolete;
    }
}
