//! lang-replacer
//!
//! GregTech 形式の lang ファイルを原文と突き合わせ、正規表現ルールと用語集で
//! 未翻訳エントリを自動翻訳する

use std::path::Path;

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod glossary;
pub mod lang;
pub mod pattern;
mod test_utils;

pub use engine::{
    Engine,
    ProcessReport,
};
pub use error::ReplacerError;

use crate::cli::Cli;
use crate::glossary::Glossary;
use crate::lang::EntryStore;
use crate::pattern::PatternRegistry;

/// Runs one reconciliation pass.
///
/// Every input is loaded before anything is written, so a fatal error leaves
/// the output file and glossary untouched.
///
/// # Errors
/// - Invalid settings
/// - Unreadable lang or pattern file, or an invalid pattern rule
/// - Output or glossary cannot be written
pub fn run(cli: &Cli) -> Result<ProcessReport, ReplacerError> {
    let mut settings = config::load_settings(cli.config.as_deref(), Path::new("."))?;
    cli.apply_overrides(&mut settings);

    let mut store = EntryStore::load(&cli.original, &cli.translated, &settings)?;
    let patterns = PatternRegistry::load(&cli.pattern)?;
    let glossary = Glossary::load_or_default(&cli.glossary);

    let report = Engine::new(&patterns, &glossary, &settings).process(&mut store);
    tracing::info!(
        "Processed {} entries: {} translated, {} partially translated, {} unresolved, {} without patterns, {} skipped",
        report.total(),
        report.translated,
        report.partially_translated,
        report.unresolved,
        report.no_pattern,
        report.skipped
    );

    // Serialize before the first write so only an I/O failure can split the outputs.
    let glossary_json = glossary.to_json_string()?;
    lang::write_lang_file(&cli.output, &store, &settings.entry_marker)?;
    Glossary::write_json(&cli.glossary, &glossary_json)?;
    tracing::debug!("Saved {} glossary entries to {:?}", glossary.len(), cli.glossary);

    Ok(report)
}
