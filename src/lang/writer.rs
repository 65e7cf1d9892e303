//! Renders an entry store in the Forge configuration layout used by lang files.

use std::fmt::Write as _;
use std::path::Path;

use super::{
    EntryStore,
    LangFileError,
};

const HEADER: &str = "# Configuration file\n\nenablelangfile {\n    B:UseThisFileAsLanguageFile=true\n}\n\n\nlanguagefile {\n";
const FOOTER: &str = "}\n\n\n";

/// Renders every entry as `    {marker}{key}={value}` inside the fixed wrapper,
/// sorted by key.
#[must_use]
pub fn render_lang_file(store: &EntryStore, marker: &str) -> String {
    let mut out = String::from(HEADER);
    for entry in store.iter() {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "    {marker}{}={}", entry.key, entry.final_target_value);
    }
    out.push_str(FOOTER);
    out
}

/// Writes the rendered lang file in a single call.
///
/// # Errors
/// Returns error if the file cannot be written.
pub fn write_lang_file(path: &Path, store: &EntryStore, marker: &str) -> Result<(), LangFileError> {
    let content = render_lang_file(store, marker);
    std::fs::write(path, content)
        .map_err(|source| LangFileError::Write { path: path.to_path_buf(), source })?;
    tracing::debug!("Wrote {} entries to {:?}", store.len(), path);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::lang::Entry;

    #[rstest]
    fn test_render_empty_store() {
        let store = EntryStore::new();

        assert_eq!(
            render_lang_file(&store, "S:"),
            "# Configuration file\n\nenablelangfile {\n    B:UseThisFileAsLanguageFile=true\n}\n\n\nlanguagefile {\n}\n\n\n"
        );
    }

    #[rstest]
    fn test_render_sorts_entries_and_writes_final_value() {
        let mut store = EntryStore::new();
        let mut casing = Entry::new("tile.casing", "Bronze Machine Casing");
        casing.final_target_value = "青铜 机器外壳".to_string();
        store.insert(casing);
        store.insert(Entry::new("item.a", "Ingot").with_prior_translation("锭"));

        let rendered = render_lang_file(&store, "S:");

        assert!(rendered.ends_with(
            "languagefile {\n    S:item.a=锭\n    S:tile.casing=青铜 机器外壳\n}\n\n\n"
        ));
    }

    #[googletest::test]
    fn test_write_lang_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.lang");
        let mut store = EntryStore::new();
        store.insert(Entry::new("a", "A").with_prior_translation("甲"));

        write_lang_file(&path, &store, "S:").unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        expect_that!(written, contains_substring("    S:a=甲\n"));
        expect_that!(written, starts_with("# Configuration file\n"));
    }

    #[rstest]
    fn test_write_lang_file_into_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("out.lang");

        let result = write_lang_file(&path, &EntryStore::new(), "S:");

        assert!(matches!(result, Err(LangFileError::Write { .. })));
    }
}
