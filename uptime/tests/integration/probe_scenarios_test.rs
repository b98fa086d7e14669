//! Integration Test: 単一エンドポイントのプローブ
//!
//! ステータスコード・レイテンシ・通信エラーごとのUP/DOWN判定と
//! 応答時間の記録有無を確認する

use crate::support::{endpoint_for, ms, mount_get, unreachable_url};
use serde_json::json;
use uptime::types::endpoint::{EndpointSpec, ProbeOutcome, ProbeStatus};
use uptime::HealthProber;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn prober() -> HealthProber {
    HealthProber::new().expect("failed to build prober")
}

#[tokio::test]
async fn fast_success_is_up_with_latency() {
    let server = MockServer::start().await;
    mount_get(&server, "/fast", 200, ms(200)).await;

    let outcome = prober().probe(&endpoint_for(&server, "fast", "/fast")).await;

    assert_eq!(outcome.status, ProbeStatus::Up);
    assert_eq!(outcome.domain.as_deref(), Some("127.0.0.1"));
    let elapsed = outcome.response_time.expect("latency should be recorded");
    assert!(elapsed >= ms(200), "elapsed was {:?}", elapsed);
    assert!(elapsed <= ms(500), "elapsed was {:?}", elapsed);
}

#[tokio::test]
async fn slow_success_is_down_with_latency() {
    let server = MockServer::start().await;
    mount_get(&server, "/slow", 200, ms(800)).await;

    let outcome = prober().probe(&endpoint_for(&server, "slow", "/slow")).await;

    assert_eq!(outcome.status, ProbeStatus::Down);
    assert_eq!(outcome.domain.as_deref(), Some("127.0.0.1"));
    let elapsed = outcome.response_time.expect("latency should be recorded");
    assert!(elapsed >= ms(800), "elapsed was {:?}", elapsed);
}

#[tokio::test]
async fn server_error_is_down_with_latency() {
    let server = MockServer::start().await;
    mount_get(&server, "/error", 500, ms(100)).await;

    let outcome = prober().probe(&endpoint_for(&server, "error", "/error")).await;

    assert_eq!(outcome.status, ProbeStatus::Down);
    let elapsed = outcome.response_time.expect("latency should be recorded");
    assert!(elapsed >= ms(100), "elapsed was {:?}", elapsed);
}

#[tokio::test]
async fn not_found_is_down_with_latency() {
    let server = MockServer::start().await;
    mount_get(&server, "/missing", 404, ms(0)).await;

    let outcome = prober().probe(&endpoint_for(&server, "missing", "/missing")).await;

    assert_eq!(outcome.status, ProbeStatus::Down);
    assert!(outcome.response_time.is_some());
}

#[tokio::test]
async fn timeout_is_down_without_latency() {
    let server = MockServer::start().await;
    mount_get(&server, "/hang", 200, ms(2_000)).await;

    let endpoint = endpoint_for(&server, "hang", "/hang").with_timeout_secs(0.3);
    let outcome = prober().probe(&endpoint).await;

    assert_eq!(outcome, ProbeOutcome::no_response("127.0.0.1"));
}

#[tokio::test]
async fn connection_refused_is_down_without_latency() {
    let endpoint = EndpointSpec::new("refused", unreachable_url());

    let outcome = prober().probe(&endpoint).await;

    assert_eq!(outcome, ProbeOutcome::no_response("127.0.0.1"));
}

#[tokio::test]
async fn missing_url_has_no_domain() {
    let endpoint = EndpointSpec {
        name: Some("no url".to_string()),
        ..EndpointSpec::default()
    };

    let outcome = prober().probe(&endpoint).await;

    assert_eq!(outcome, ProbeOutcome::unattributed());
}

#[tokio::test]
async fn malformed_body_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let endpoint = endpoint_for(&server, "bad body", "/submit")
        .with_method("POST")
        .with_body("{\"foo\":");
    let outcome = prober().probe(&endpoint).await;

    assert_eq!(outcome, ProbeOutcome::unattributed());
}

#[tokio::test]
async fn post_sends_method_headers_and_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/some/post/endpoint"))
        .and(header("user-agent", "fetch-synthetic-monitor"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"foo": "bar"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = endpoint_for(&server, "post endpoint", "/some/post/endpoint")
        .with_method("post")
        .with_header("user-agent", "fetch-synthetic-monitor")
        .with_header("content-type", "application/json")
        .with_body(r#"{"foo":"bar"}"#);
    let outcome = prober().probe(&endpoint).await;

    assert_eq!(outcome.status, ProbeStatus::Up);
}

#[tokio::test]
async fn absent_body_is_sent_as_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = prober().probe(&endpoint_for(&server, "index", "/")).await;

    assert_eq!(outcome.status, ProbeStatus::Up);
}

#[tokio::test]
async fn custom_latency_threshold_is_applied() {
    let server = MockServer::start().await;
    mount_get(&server, "/medium", 200, ms(300)).await;

    let strict = prober().with_latency_threshold(ms(100));
    let outcome = strict.probe(&endpoint_for(&server, "medium", "/medium")).await;

    assert_eq!(outcome.status, ProbeStatus::Down);
    assert!(outcome.response_time.is_some());
}
