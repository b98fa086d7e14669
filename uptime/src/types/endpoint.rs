//! エンドポイント型定義
//!
//! 設定ファイルから読み込むエンドポイント記述子と、プローブ結果の型

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// デフォルトのHTTPメソッド
pub const DEFAULT_METHOD: &str = "GET";

/// デフォルトのリクエストタイムアウト（秒）
pub const DEFAULT_TIMEOUT_SECS: f64 = 1.0;

fn default_method() -> String {
    DEFAULT_METHOD.to_string()
}

fn default_timeout_secs() -> f64 {
    DEFAULT_TIMEOUT_SECS
}

/// エンドポイント記述子
///
/// `name`と`url`は必須だが、欠落した記述子もファイル全体の読み込みは
/// 失敗させず、プローブ時に設定エラーとして扱うため`Option`で保持する。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndpointSpec {
    /// 表示名
    #[serde(default)]
    pub name: Option<String>,
    /// プローブ先URL
    #[serde(default)]
    pub url: Option<String>,
    /// HTTPメソッド（デフォルト: GET）
    #[serde(default = "default_method")]
    pub method: String,
    /// リクエストヘッダー
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// JSON文字列のリクエストボディ
    #[serde(default)]
    pub body: Option<String>,
    /// タイムアウト（秒、デフォルト: 1）
    #[serde(rename = "timeout", default = "default_timeout_secs")]
    pub timeout_secs: f64,
}

impl Default for EndpointSpec {
    fn default() -> Self {
        Self {
            name: None,
            url: None,
            method: default_method(),
            headers: BTreeMap::new(),
            body: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EndpointSpec {
    /// 名前とURLを指定して作成
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// HTTPメソッドを設定
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// ヘッダーを追加
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// JSONボディを設定
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// タイムアウト（秒）を設定
    pub fn with_timeout_secs(mut self, timeout_secs: f64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// ログ表示用の名前（未設定なら`<unnamed>`）
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// プローブの判定結果
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProbeStatus {
    /// 稼働中（2xx かつ レイテンシ閾値以内）
    Up,
    /// 停止（それ以外すべて）
    Down,
}

impl ProbeStatus {
    /// 文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
        }
    }
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 単一プローブの結果
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    /// 集計キーとなるドメイン（記述子が不正な場合はNone）
    pub domain: Option<String>,
    /// UP/DOWN判定
    pub status: ProbeStatus,
    /// 計測した応答時間（レスポンスを受信した場合のみ）
    pub response_time: Option<Duration>,
}

impl ProbeOutcome {
    /// 記述子が不正でドメインを特定できない結果
    pub fn unattributed() -> Self {
        Self {
            domain: None,
            status: ProbeStatus::Down,
            response_time: None,
        }
    }

    /// レスポンスを受信できなかった結果
    pub fn no_response(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            status: ProbeStatus::Down,
            response_time: None,
        }
    }

    /// レスポンスを受信した結果
    pub fn responded(domain: impl Into<String>, status: ProbeStatus, elapsed: Duration) -> Self {
        Self {
            domain: Some(domain.into()),
            status,
            response_time: Some(elapsed),
        }
    }

    /// UP判定か
    pub fn is_up(&self) -> bool {
        self.status == ProbeStatus::Up
    }
}
