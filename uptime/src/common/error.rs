//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! プローブ単位のエラー（`ProbeError`）は集計側へ伝播せず、DOWN判定として
//! 扱われる。プロセスを終了させるのは起動時の設定読み込みエラー
//! （`ConfigError`）のみ。

use std::path::PathBuf;
use thiserror::Error;

/// 単一エンドポイントのプローブで発生するエラー
#[derive(Debug, Error)]
pub enum ProbeError {
    /// 必須フィールドの欠落
    #[error("Missing '{0}' in endpoint configuration")]
    MissingField(&'static str),

    /// URLのパース失敗
    #[error("Invalid url '{url}': {reason}")]
    InvalidUrl {
        /// 設定されたURL
        url: String,
        /// パーサーのエラー内容
        reason: String,
    },

    /// ホスト部を持たないURL
    #[error("Url has no host component: {0}")]
    MissingHost(String),

    /// リクエストボディがJSONとして不正
    #[error("Invalid JSON body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// HTTPメソッドが不正
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// HTTPヘッダーが不正
    #[error("Invalid header '{0}'")]
    InvalidHeader(String),

    /// タイムアウト値が不正（0以下、NaN、無限大）
    #[error("Invalid timeout: {0} seconds")]
    InvalidTimeout(f64),

    /// 通信エラー（接続拒否、DNS、TLS、タイムアウト等）
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ProbeError {
    /// エンドポイント設定に起因するエラーか
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::Transport(_))
    }

    /// タイムアウトによる通信エラーか
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

/// エンドポイント定義ファイルの読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// ファイルが読めない
    #[error("Configuration file not found or unreadable: {path}: {source}")]
    Io {
        /// 設定ファイルのパス
        path: PathBuf,
        /// 元のI/Oエラー
        #[source]
        source: std::io::Error,
    },

    /// YAMLのパース失敗
    #[error("Error parsing YAML file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// モニター初期化エラー
#[derive(Debug, Error)]
pub enum MonitorError {
    /// HTTPクライアントの構築失敗
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
