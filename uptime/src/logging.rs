//! ロギング初期化ユーティリティ
//!
//! ログレベルは `UPTIME_LOG_LEVEL`（未設定なら `RUST_LOG`、どちらもなければ `info`）。

use crate::config::get_env_with_fallback_or;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// デフォルトのログレベル
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// 環境変数からログフィルタを作成
///
/// 不正なフィルタ指定はデフォルトレベルにフォールバックする。
pub fn env_filter() -> EnvFilter {
    let level = get_env_with_fallback_or("UPTIME_LOG_LEVEL", "RUST_LOG", DEFAULT_LOG_LEVEL);
    EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// グローバルサブスクライバーを初期化
pub fn init() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_target(false))
        .try_init()
}
