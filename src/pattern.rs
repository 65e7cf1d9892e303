//! Decomposition rules: regex wrappers that are stripped from entry values
//! and replayed onto their translations.
/// Single wrapper rule
mod rule;
/// Ordered rule collection and rule file loader
mod registry;
/// Replacement template with one insertion slot
mod template;

pub use registry::{
    PatternError,
    PatternRegistry,
    PatternRule,
};
pub(crate) use rule::compile_anchored;
pub use rule::{
    Pattern,
    PatternField,
    RuleError,
};
pub use template::{
    Template,
    TemplateError,
};
