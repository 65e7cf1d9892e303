//! Decomposition and resolution of entries.
//!
//! Each entry value is stripped outside-in by the wrapper rules that apply to
//! its identifier. The remaining main word is looked up in the glossary and
//! the stripped wrappers are replayed inside-out onto its translation:
//!
//! ```text
//! "Bronze Machine Casing"  --strip "(.+) Machine Casing$"-->  "Bronze"
//! "Bronze"                 --glossary------------------->  "青铜"
//! "青铜"                    --wrap "{0} 机器外壳"----------->  "青铜 机器外壳"
//! ```

use crate::config::ReplacerSettings;
use crate::glossary::Glossary;
use crate::lang::{
    Entry,
    EntryStore,
};
use crate::pattern::{
    Pattern,
    PatternRegistry,
};

/// What happened to a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No source value, or an existing translation is respected.
    Skipped,
    /// No rule applies to the identifier; prior translation kept.
    NoPattern,
    /// Main word missing from the glossary; prior translation kept.
    Unresolved,
    /// Main word translated and wrappers replayed.
    Translated,
    /// Main word missing from the glossary and used untranslated.
    PartiallyTranslated,
}

/// Per-outcome counters of one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessReport {
    pub skipped: usize,
    pub no_pattern: usize,
    pub unresolved: usize,
    pub translated: usize,
    pub partially_translated: usize,
}

impl ProcessReport {
    fn record(&mut self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Skipped => &mut self.skipped,
            Outcome::NoPattern => &mut self.no_pattern,
            Outcome::Unresolved => &mut self.unresolved,
            Outcome::Translated => &mut self.translated,
            Outcome::PartiallyTranslated => &mut self.partially_translated,
        };
        *counter += 1;
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.skipped + self.no_pattern + self.unresolved + self.translated + self.partially_translated
    }
}

/// Result of stripping an entry value.
///
/// `stack` holds the rules that matched, in the order they were stripped.
#[derive(Debug, Clone)]
pub struct Decomposition<'p, 'v> {
    main_word: &'v str,
    stack: Vec<&'p Pattern>,
}

impl<'p> Decomposition<'p, '_> {
    #[must_use]
    pub const fn main_word(&self) -> &str {
        self.main_word
    }

    #[must_use]
    pub fn stack(&self) -> &[&'p Pattern] {
        &self.stack
    }

    /// Replays the stripped wrappers onto `translation`, innermost first.
    #[must_use]
    pub fn rebuild(&self, translation: &str) -> String {
        self.stack.iter().rev().fold(translation.to_string(), |inner, pattern| pattern.wrap(&inner))
    }
}

/// Applies rules and glossary to entries.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'a> {
    patterns: &'a PatternRegistry,
    glossary: &'a Glossary,
    settings: &'a ReplacerSettings,
}

impl<'a> Engine<'a> {
    #[must_use]
    pub const fn new(
        patterns: &'a PatternRegistry,
        glossary: &'a Glossary,
        settings: &'a ReplacerSettings,
    ) -> Self {
        Self { patterns, glossary, settings }
    }

    /// Strips every applicable wrapper from `value`.
    ///
    /// Candidates are tried once each, highest priority first; a rule that
    /// does not match the current remainder is skipped. Returns `None` when
    /// no rule applies to `key`.
    #[must_use]
    pub fn decompose<'v>(&self, key: &str, value: &'v str) -> Option<Decomposition<'a, 'v>> {
        let candidates = self.patterns.candidates(key);
        if candidates.is_empty() {
            return None;
        }

        let mut main_word = value;
        let mut stack = Vec::with_capacity(candidates.len());
        for pattern in candidates {
            if let Some(remainder) = pattern.strip(main_word) {
                stack.push(pattern);
                main_word = remainder;
            }
        }

        Some(Decomposition { main_word, stack })
    }

    /// Computes the new translation of `entry` without modifying it.
    ///
    /// `None` means the entry keeps its prior translation.
    #[must_use]
    pub fn translate(&self, entry: &Entry) -> (Outcome, Option<String>) {
        if entry.source_value.is_empty()
            || (self.settings.respect_translated && !entry.prior_target_value.is_empty())
        {
            return (Outcome::Skipped, None);
        }

        let Some(decomposition) = self.decompose(&entry.key, &entry.source_value) else {
            return (Outcome::NoPattern, None);
        };

        let main_word = decomposition.main_word();
        match self.glossary.resolve(main_word, &entry.key) {
            Some(translation) => (Outcome::Translated, Some(decomposition.rebuild(translation))),
            None if self.settings.allow_partial_translation => {
                tracing::debug!("No glossary entry for '{}' ({}), keeping it untranslated", main_word, entry.key);
                (Outcome::PartiallyTranslated, Some(decomposition.rebuild(main_word)))
            }
            None => {
                tracing::debug!("No glossary entry for '{}' ({})", main_word, entry.key);
                (Outcome::Unresolved, None)
            }
        }
    }

    /// Sets `entry.final_target_value`.
    pub fn process_entry(&self, entry: &mut Entry) -> Outcome {
        let (outcome, translation) = self.translate(entry);
        entry.final_target_value = translation.unwrap_or_else(|| entry.prior_target_value.clone());
        outcome
    }

    /// Processes every entry of `store`.
    pub fn process(&self, store: &mut EntryStore) -> ProcessReport {
        let mut report = ProcessReport::default();
        for entry in store.iter_mut() {
            report.record(self.process_entry(entry));
        }
        report
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::{
        fixture,
        rstest,
    };

    use super::*;
    use crate::glossary::GlossaryEntry;
    use crate::test_utils::{
        glossary_of,
        pattern,
    };

    #[fixture]
    fn patterns() -> PatternRegistry {
        [
            pattern(r"tile\.blockCasing", "(.+) Machine Casing$", "{0} 机器外壳", 0),
            pattern(r"item\.", "Tiny Pile of (.+) Dust$", "小撮{0}粉", 1),
            pattern(r"item\.", "(.+) Dust$", "{0}粉", 0),
            pattern(r"item\.", r"(.+) \(Hot\)$", "热{0}", 5),
        ]
        .into_iter()
        .collect()
    }

    #[fixture]
    fn glossary() -> Glossary {
        glossary_of(&[("Bronze", "青铜"), ("Copper", "铜"), ("Steel", "钢")])
    }

    fn run(
        patterns: &PatternRegistry,
        glossary: &Glossary,
        settings: &ReplacerSettings,
        entry: Entry,
    ) -> (Outcome, Entry) {
        let mut entry = entry;
        let outcome = Engine::new(patterns, glossary, settings).process_entry(&mut entry);
        (outcome, entry)
    }

    #[rstest]
    fn test_bronze_machine_casing(patterns: PatternRegistry, glossary: Glossary) {
        let entry = Entry::new("tile.blockCasing4Bronze.name", "Bronze Machine Casing");

        let (outcome, entry) = run(&patterns, &glossary, &ReplacerSettings::default(), entry);

        assert_eq!(outcome, Outcome::Translated);
        assert_eq!(entry.final_target_value, "青铜 机器外壳");
    }

    #[rstest]
    fn test_no_candidate_patterns_keeps_prior(patterns: PatternRegistry, glossary: Glossary) {
        let entry = Entry::new("gui.title", "Bronze").with_prior_translation("旧译文");

        let (outcome, entry) = run(&patterns, &glossary, &ReplacerSettings::default(), entry);

        assert_eq!(outcome, Outcome::NoPattern);
        assert_eq!(entry.final_target_value, "旧译文");
    }

    #[rstest]
    #[case::hot_tiny_pile("Tiny Pile of Copper Dust (Hot)", "热小撮铜粉")]
    #[case::dust("Steel Dust", "钢粉")]
    #[case::tiny_pile("Tiny Pile of Bronze Dust", "小撮青铜粉")]
    #[case::bare("Copper", "铜")]
    fn test_nested_wrappers(
        patterns: PatternRegistry,
        glossary: Glossary,
        #[case] source: &str,
        #[case] expected: &str,
    ) {
        let entry = Entry::new("item.dust", source);

        let (outcome, entry) = run(&patterns, &glossary, &ReplacerSettings::default(), entry);

        assert_eq!(outcome, Outcome::Translated);
        assert_eq!(entry.final_target_value, expected);
    }

    #[rstest]
    fn test_decompose_stack_follows_priority(patterns: PatternRegistry, glossary: Glossary) {
        let settings = ReplacerSettings::default();
        let engine = Engine::new(&patterns, &glossary, &settings);

        let decomposition = engine.decompose("item.dust", "Tiny Pile of Copper Dust (Hot)").unwrap();

        assert_that!(decomposition.main_word(), eq("Copper"));
        let replacements: Vec<String> =
            decomposition.stack().iter().map(|p| p.replacement().to_string()).collect();
        assert_that!(replacements, elements_are![eq("热{0}"), eq("小撮{0}粉")]);
    }

    #[rstest]
    fn test_rebuild_applies_every_stacked_wrapper_in_reverse() {
        let patterns: PatternRegistry = [
            pattern("k", r"<(.*)>", "<{0}>", 3),
            pattern("k", r"\[(.*)\]", "[{0}]", 2),
            pattern("k", r"\((.*)\)", "({0})", 1),
        ]
        .into_iter()
        .collect();
        let glossary = glossary_of(&[("x", "y")]);
        let settings = ReplacerSettings::default();
        let engine = Engine::new(&patterns, &glossary, &settings);

        let decomposition = engine.decompose("k", "<[(x)]>").unwrap();

        assert_eq!(decomposition.stack().len(), 3);
        assert_eq!(decomposition.main_word(), "x");
        assert_eq!(decomposition.rebuild("y"), "<[(y)]>");
    }

    #[rstest]
    fn test_higher_priority_is_attempted_first() {
        // Both match the full value; whichever runs first consumes the wrapper.
        let patterns: PatternRegistry = [
            pattern("k", "(.+) Block$", "{0}块", 1),
            pattern("k", "(.+) Block$", "{0}方块", 5),
        ]
        .into_iter()
        .collect();
        let glossary = glossary_of(&[("Iron", "铁")]);
        let settings = ReplacerSettings::default();

        let (_, entry) = run(&patterns, &glossary, &settings, Entry::new("k", "Iron Block"));

        assert_eq!(entry.final_target_value, "铁方块");
    }

    #[rstest]
    fn test_non_reducing_capture_is_single_pass() {
        let patterns: PatternRegistry = [pattern("k", "(.*)", "«{0}»", 0)].into_iter().collect();
        let glossary = glossary_of(&[("Iron", "铁")]);
        let settings = ReplacerSettings::default();

        let (outcome, entry) = run(&patterns, &glossary, &settings, Entry::new("k", "Iron"));

        assert_eq!(outcome, Outcome::Translated);
        assert_eq!(entry.final_target_value, "«铁»");
    }

    #[rstest]
    fn test_unresolved_keeps_prior(patterns: PatternRegistry, glossary: Glossary) {
        let entry = Entry::new("item.dust", "Unobtainium Dust").with_prior_translation("旧");

        let (outcome, entry) = run(&patterns, &glossary, &ReplacerSettings::default(), entry);

        assert_eq!(outcome, Outcome::Unresolved);
        assert_eq!(entry.final_target_value, "旧");
    }

    #[rstest]
    fn test_unresolved_with_partial_translation(patterns: PatternRegistry, glossary: Glossary) {
        let settings = ReplacerSettings { allow_partial_translation: true, ..Default::default() };
        let entry = Entry::new("item.dust", "Unobtainium Dust").with_prior_translation("旧");

        let (outcome, entry) = run(&patterns, &glossary, &settings, entry);

        assert_eq!(outcome, Outcome::PartiallyTranslated);
        assert_eq!(entry.final_target_value, "Unobtainium粉");
    }

    #[rstest]
    fn test_empty_source_is_skipped(patterns: PatternRegistry, glossary: Glossary) {
        let entry = Entry::new("item.old", "").with_prior_translation("过时");

        let (outcome, entry) = run(&patterns, &glossary, &ReplacerSettings::default(), entry);

        assert_eq!(outcome, Outcome::Skipped);
        assert_eq!(entry.final_target_value, "过时");
    }

    #[rstest]
    #[case::respect_with_prior(true, "人工译文", Outcome::Skipped, "人工译文")]
    #[case::respect_without_prior(true, "", Outcome::Translated, "钢粉")]
    #[case::overwrite_prior(false, "人工译文", Outcome::Translated, "钢粉")]
    fn test_respect_translated(
        patterns: PatternRegistry,
        glossary: Glossary,
        #[case] respect_translated: bool,
        #[case] prior: &str,
        #[case] expected_outcome: Outcome,
        #[case] expected_value: &str,
    ) {
        let settings = ReplacerSettings { respect_translated, ..Default::default() };
        let entry = Entry::new("item.dust", "Steel Dust").with_prior_translation(prior);

        let (outcome, entry) = run(&patterns, &glossary, &settings, entry);

        assert_eq!(outcome, expected_outcome);
        assert_eq!(entry.final_target_value, expected_value);
    }

    #[rstest]
    fn test_contextual_glossary_uses_entry_key() {
        let patterns: PatternRegistry =
            [pattern(".*", "(.+) Casing$", "{0}外壳", 0)].into_iter().collect();
        let mut glossary = Glossary::new();
        glossary.insert("Steel", GlossaryEntry::contextual([(r"tile\.gt", "钢制"), (".*", "钢")]));
        let settings = ReplacerSettings::default();
        let engine = Engine::new(&patterns, &glossary, &settings);

        let (_, specific) = engine.translate(&Entry::new("tile.gt.casing", "Steel Casing"));
        let (_, fallback) = engine.translate(&Entry::new("tile.other", "Steel Casing"));

        assert_eq!(specific.as_deref(), Some("钢制外壳"));
        assert_eq!(fallback.as_deref(), Some("钢外壳"));
    }

    #[rstest]
    fn test_process_report_counts_outcomes(patterns: PatternRegistry, glossary: Glossary) {
        let settings = ReplacerSettings::default();
        let mut store = EntryStore::new();
        store.insert(Entry::new("item.a", "Steel Dust"));
        store.insert(Entry::new("item.b", "Mystery Dust"));
        store.insert(Entry::new("gui.c", "Steel"));
        store.insert(Entry::new("item.d", "").with_prior_translation("旧"));

        let report = Engine::new(&patterns, &glossary, &settings).process(&mut store);

        assert_that!(
            report,
            eq(ProcessReport {
                skipped: 1,
                no_pattern: 1,
                unresolved: 1,
                translated: 1,
                partially_translated: 0
            })
        );
        assert_that!(report.total(), eq(store.len()));
        assert_that!(store.get("item.a").unwrap().final_target_value.as_str(), eq("钢粉"));
    }
}
