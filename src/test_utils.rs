//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use crate::glossary::{
    Glossary,
    GlossaryEntry,
};
use crate::pattern::Pattern;

/// テスト用の Pattern を作成する
///
/// # Arguments
/// * `key` - 識別子にマッチする正規表現
/// * `value` - 値にマッチする正規表現（キャプチャグループ 1 つ）
/// * `replacement` - 置換テンプレート
/// * `priority` - 優先度
pub(crate) fn pattern(key: &str, value: &str, replacement: &str, priority: i32) -> Pattern {
    Pattern::new(key, value, replacement).unwrap().with_priority(priority)
}

/// 直接訳だけを持つテスト用の Glossary を作成する
pub(crate) fn glossary_of(pairs: &[(&str, &str)]) -> Glossary {
    pairs
        .iter()
        .map(|&(word, translation)| (word.to_string(), GlossaryEntry::Direct(translation.to_string())))
        .collect()
}
