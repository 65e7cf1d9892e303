//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    ReplacerSettings,
};

/// ディレクトリ内で自動検出される設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".lang-replacer.json";

/// 設定を読み込んでバリデーションする
///
/// `explicit_path` が指定されていればそのファイルを、なければ `search_dir` 内の
/// `.lang-replacer.json` を読み込む。どちらも無い場合はデフォルト設定。
///
/// # Errors
/// - 明示的に指定されたファイルの読み込みエラー
/// - JSON パースエラー
/// - バリデーションエラー
pub fn load_settings(
    explicit_path: Option<&Path>,
    search_dir: &Path,
) -> Result<ReplacerSettings, ConfigError> {
    let settings = match explicit_path {
        Some(path) => load_from_file(path)?,
        None => load_from_dir(search_dir)?.unwrap_or_default(),
    };

    settings.validate().map_err(ConfigError::ValidationErrors)?;
    tracing::debug!("Settings loaded successfully: {:?}", settings);

    Ok(settings)
}

/// 指定されたファイルから設定を読み込む
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_file(path: &Path) -> Result<ReplacerSettings, ConfigError> {
    tracing::debug!("Loading configuration from: {:?}", path);

    let content = std::fs::read_to_string(path)?;
    let settings: ReplacerSettings = serde_json::from_str(&content)?;

    Ok(settings)
}

/// ディレクトリから設定を読み込む
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
pub(super) fn load_from_dir(dir: &Path) -> Result<Option<ReplacerSettings>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    load_from_file(&config_path).map(Some)
}
