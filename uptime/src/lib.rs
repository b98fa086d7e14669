//! Uptime monitor
//!
//! 設定されたHTTPエンドポイントを定期的にプローブし、ドメイン単位の
//! 可用性と平均応答時間を集計・レポートする。

#![warn(missing_docs)]

/// 共通型定義（エラー型）
pub mod common;

/// 型定義
pub mod types;

/// ヘルスチェック（単一エンドポイントのプローブ）
pub mod health;

/// ドメイン単位の統計集計
pub mod stats;

/// ポーリングサイクルのスケジューラー
pub mod monitor;

/// 設定管理（エンドポイント定義ファイル、環境変数ヘルパー）
pub mod config;

/// ロギング初期化ユーティリティ
pub mod logging;

/// CLIインターフェース
pub mod cli;

/// Shutdown controller (signal driven)
pub mod shutdown;

pub use health::HealthProber;
pub use monitor::Monitor;
pub use stats::StatsAggregator;
