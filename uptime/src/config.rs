//! Configuration management
//!
//! Endpoint definitions are read from a YAML file; runtime settings come from
//! CLI arguments and environment variables.

use crate::common::error::ConfigError;
use crate::health::UP_LATENCY_THRESHOLD;
use crate::types::endpoint::EndpointSpec;
use std::path::Path;
use std::time::Duration;

/// デフォルトのチェック間隔（秒）
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 15;

/// Get an environment variable, falling back to a second name
///
/// Empty values are treated as unset.
///
/// # Example
/// ```
/// use uptime::config::get_env_with_fallback;
///
/// let level = get_env_with_fallback("UPTIME_LOG_LEVEL", "RUST_LOG");
/// ```
pub fn get_env_with_fallback(primary: &str, fallback: &str) -> Option<String> {
    [primary, fallback]
        .into_iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(primary: &str, fallback: &str, default: &str) -> String {
    get_env_with_fallback(primary, fallback).unwrap_or_else(|| default.to_string())
}

/// プローブの実行方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeMode {
    /// 1エンドポイントずつ順番にプローブ
    #[default]
    Sequential,
    /// 1サイクル内の全エンドポイントを同時にプローブ
    Concurrent,
}

/// モニター設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSettings {
    /// サイクル間のスリープ時間
    pub check_interval: Duration,
    /// UP判定のレイテンシ上限
    pub latency_threshold: Duration,
    /// プローブの実行方式
    pub probe_mode: ProbeMode,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            check_interval: Duration::from_secs(DEFAULT_CHECK_INTERVAL_SECS),
            latency_threshold: UP_LATENCY_THRESHOLD,
            probe_mode: ProbeMode::default(),
        }
    }
}

impl MonitorSettings {
    /// チェック間隔を設定
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.check_interval = interval;
        self
    }

    /// プローブの実行方式を設定
    pub fn with_probe_mode(mut self, probe_mode: ProbeMode) -> Self {
        self.probe_mode = probe_mode;
        self
    }
}

/// エンドポイント定義ファイル（YAML）を読み込む
///
/// ファイルはエンドポイント記述子のリスト。空ファイルは空リストとして扱う。
pub fn load_endpoints(path: &Path) -> Result<Vec<EndpointSpec>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_endpoints(&content)
}

/// YAML文字列からエンドポイント記述子のリストを読み込む
pub fn parse_endpoints(content: &str) -> Result<Vec<EndpointSpec>, ConfigError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let endpoints: Option<Vec<EndpointSpec>> = serde_yaml::from_str(content)?;
    Ok(endpoints.unwrap_or_default())
}
