//! エンドポイントプローバー
//!
//! 1回のリクエストを発行し、結果を`ProbeOutcome`に分類する

use crate::common::error::ProbeError;
use crate::types::endpoint::{EndpointSpec, ProbeOutcome, ProbeStatus};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// UP判定のレイテンシ上限
pub const UP_LATENCY_THRESHOLD: Duration = Duration::from_millis(500);

/// ステータスコードと経過時間からUP/DOWNを判定
///
/// 2xx かつ `elapsed <= threshold` の場合のみUP。
pub fn classify(status_code: u16, elapsed: Duration, threshold: Duration) -> ProbeStatus {
    if (200..300).contains(&status_code) && elapsed <= threshold {
        ProbeStatus::Up
    } else {
        ProbeStatus::Down
    }
}

/// URLからホスト名のみを取り出す
///
/// スキーム、ユーザー情報、ポート、パス、クエリは除去する。
/// IPv6アドレスは角括弧を外した形で返す。
pub fn extract_domain(url: &str) -> Result<String, ProbeError> {
    parse_url(url).map(|(_, domain)| domain)
}

fn parse_url(url: &str) -> Result<(Url, String), ProbeError> {
    let parsed = Url::parse(url).map_err(|e| ProbeError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    let domain = parsed
        .host_str()
        .map(|host| host.trim_start_matches('[').trim_end_matches(']'))
        .filter(|host| !host.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ProbeError::MissingHost(url.to_string()))?;
    Ok((parsed, domain))
}

/// 送信準備が整ったプローブ
struct PreparedProbe {
    domain: String,
    url: Url,
    request: RequestBuilder,
}

/// エンドポイントプローバー
///
/// 全プローブで1つの`reqwest::Client`を共有し、タイムアウトは
/// リクエスト単位で設定する。
#[derive(Debug, Clone)]
pub struct HealthProber {
    /// HTTPクライアント
    client: Client,
    /// UP判定のレイテンシ上限
    latency_threshold: Duration,
}

impl HealthProber {
    /// 新しいプローバーを作成
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client))
    }

    /// 既存のHTTPクライアントから作成
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            latency_threshold: UP_LATENCY_THRESHOLD,
        }
    }

    /// レイテンシ上限を設定
    pub fn with_latency_threshold(mut self, threshold: Duration) -> Self {
        self.latency_threshold = threshold;
        self
    }

    /// レイテンシ上限
    pub fn latency_threshold(&self) -> Duration {
        self.latency_threshold
    }

    /// 単一エンドポイントをプローブ
    ///
    /// エラーはすべてここで吸収し、DOWNの`ProbeOutcome`として返す。
    /// 設定エラーはドメインなし、通信エラーは応答時間なしになる。
    pub async fn probe(&self, endpoint: &EndpointSpec) -> ProbeOutcome {
        let prepared = match self.prepare(endpoint) {
            Ok(prepared) => prepared,
            Err(e) => {
                error!(
                    endpoint_name = %endpoint.display_name(),
                    error = %e,
                    "Invalid endpoint configuration: {:?}",
                    endpoint
                );
                return ProbeOutcome::unattributed();
            }
        };

        let start = Instant::now();
        let result = Self::execute(prepared.request).await;
        let elapsed = start.elapsed();

        match result {
            Ok(status_code) => {
                let status = classify(status_code.as_u16(), elapsed, self.latency_threshold);
                if status == ProbeStatus::Up {
                    info!(
                        endpoint_name = %endpoint.display_name(),
                        domain = %prepared.domain,
                        "Endpoint {} returned status code {} with response time {:.3}s",
                        prepared.url,
                        status_code.as_u16(),
                        elapsed.as_secs_f64()
                    );
                } else {
                    warn!(
                        endpoint_name = %endpoint.display_name(),
                        domain = %prepared.domain,
                        "Endpoint {} returned status code {} with response time {:.3}s",
                        prepared.url,
                        status_code.as_u16(),
                        elapsed.as_secs_f64()
                    );
                }
                ProbeOutcome::responded(prepared.domain, status, elapsed)
            }
            Err(e) => {
                let e = ProbeError::from(e);
                error!(
                    endpoint_name = %endpoint.display_name(),
                    domain = %prepared.domain,
                    timeout = e.is_timeout(),
                    "Error checking {}: {}",
                    prepared.url,
                    e
                );
                ProbeOutcome::no_response(prepared.domain)
            }
        }
    }

    /// 記述子を検証し、リクエストを組み立てる
    fn prepare(&self, endpoint: &EndpointSpec) -> Result<PreparedProbe, ProbeError> {
        let url = non_blank(endpoint.url.as_deref()).ok_or(ProbeError::MissingField("url"))?;
        non_blank(endpoint.name.as_deref()).ok_or(ProbeError::MissingField("name"))?;

        let (parsed, domain) = parse_url(url)?;

        let method = parse_method(&endpoint.method)?;
        let headers = build_headers(endpoint)?;
        let body = parse_body(endpoint.body.as_deref())?;
        let timeout = parse_timeout(endpoint.timeout_secs)?;

        let request = self
            .client
            .request(method, parsed.clone())
            .headers(headers)
            .json(&body)
            .timeout(timeout);

        Ok(PreparedProbe {
            domain,
            url: parsed,
            request,
        })
    }

    /// リクエストを送信し、ボディを読み切ってステータスを返す
    async fn execute(request: RequestBuilder) -> Result<StatusCode, reqwest::Error> {
        let response = request.send().await?;
        let status = response.status();
        response.bytes().await?;
        Ok(status)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_method(method: &str) -> Result<Method, ProbeError> {
    let normalized = method.trim().to_ascii_uppercase();
    Method::from_bytes(normalized.as_bytes())
        .map_err(|_| ProbeError::InvalidMethod(method.to_string()))
}

fn build_headers(endpoint: &EndpointSpec) -> Result<HeaderMap, ProbeError> {
    let mut headers = HeaderMap::with_capacity(endpoint.headers.len());
    for (name, value) in &endpoint.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ProbeError::InvalidHeader(name.clone()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| ProbeError::InvalidHeader(name.clone()))?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

/// ボディ未指定（空文字含む）なら空オブジェクト
fn parse_body(body: Option<&str>) -> Result<serde_json::Value, ProbeError> {
    match non_blank(body) {
        Some(raw) => Ok(serde_json::from_str(raw)?),
        None => Ok(serde_json::Value::Object(serde_json::Map::new())),
    }
}

fn parse_timeout(timeout_secs: f64) -> Result<Duration, ProbeError> {
    if timeout_secs <= 0.0 {
        return Err(ProbeError::InvalidTimeout(timeout_secs));
    }
    Duration::try_from_secs_f64(timeout_secs).map_err(|_| ProbeError::InvalidTimeout(timeout_secs))
}
