use thiserror::Error;

use crate::config::ConfigError;
use crate::glossary::GlossaryError;
use crate::lang::LangFileError;
use crate::pattern::PatternError;

/// Fatal errors of a replacer run.
///
/// Glossary load failures are not fatal and never surface here; only a
/// failed glossary save does.
#[derive(Error, Debug)]
pub enum ReplacerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    LangFile(#[from] LangFileError),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Glossary(#[from] GlossaryError),
}
