//! ヘルスチェック
//!
//! 単一エンドポイントへリクエストを送り、ステータスコードとレイテンシから
//! UP/DOWNを判定する。集計やスケジューリングは`monitor`と`stats`が担当する。

/// エンドポイントプローバー
pub mod prober;

pub use prober::{classify, extract_domain, HealthProber, UP_LATENCY_THRESHOLD};
