//! Replacer settings and their JSON loader.
/// Config file loader
mod loader;
/// Settings types and validation
mod types;

pub use loader::{
    CONFIG_FILE_NAME,
    load_settings,
};
pub use types::{
    ConfigError,
    DEFAULT_ENTRY_MARKER,
    ReplacerSettings,
    ValidationError,
};
