//! Property-based tests using proptest

use proptest::prelude::*;
use std::time::Duration;

use uptime::health::{classify, UP_LATENCY_THRESHOLD};
use uptime::stats::StatsAggregator;
use uptime::types::endpoint::{ProbeOutcome, ProbeStatus};

/// (UPか, 応答時間ミリ秒) の列からプローブ結果を作る
fn outcome(domain: &str, up: bool, latency_ms: Option<u64>) -> ProbeOutcome {
    let status = if up { ProbeStatus::Up } else { ProbeStatus::Down };
    match latency_ms {
        Some(value) => ProbeOutcome::responded(domain, status, Duration::from_millis(value)),
        None => ProbeOutcome {
            domain: Some(domain.to_string()),
            status,
            response_time: None,
        },
    }
}

fn probe_sequence() -> impl Strategy<Value = Vec<(bool, Option<u64>)>> {
    prop::collection::vec((any::<bool>(), prop::option::of(0u64..5_000)), 0..50)
}

proptest! {
    /// 可用性は常に0〜100で、UP/(UP+DOWN)に一致
    #[test]
    fn availability_is_bounded_percentage(probes in probe_sequence()) {
        let mut aggregator = StatsAggregator::new();
        for (up, latency) in &probes {
            aggregator.record(&outcome("example.com", *up, *latency));
        }

        match aggregator.get("example.com") {
            None => prop_assert!(probes.is_empty()),
            Some(stats) => {
                let availability = stats.availability();
                prop_assert!((0.0..=100.0).contains(&availability));

                let ups = probes.iter().filter(|(up, _)| *up).count() as f64;
                let expected = 100.0 * ups / probes.len() as f64;
                prop_assert!((availability - expected).abs() < 1e-9);
            }
        }
    }

    /// UP/DOWNカウンタは減少しない
    #[test]
    fn counters_never_decrease(probes in probe_sequence()) {
        let mut aggregator = StatsAggregator::new();
        let mut previous = (0u64, 0u64);
        for (up, latency) in &probes {
            aggregator.record(&outcome("example.com", *up, *latency));
            let stats = aggregator.get("example.com").unwrap();
            prop_assert!(stats.up_count() >= previous.0);
            prop_assert!(stats.down_count() >= previous.1);
            prop_assert_eq!(stats.total_count(), previous.0 + previous.1 + 1);
            previous = (stats.up_count(), stats.down_count());
        }
    }

    /// 応答時間は応答を受信したプローブの分だけ記録される
    #[test]
    fn latency_recorded_iff_response_received(probes in probe_sequence()) {
        let mut aggregator = StatsAggregator::new();
        for (up, latency) in &probes {
            aggregator.record(&outcome("example.com", *up, *latency));
        }

        let expected = probes.iter().filter(|(_, latency)| latency.is_some()).count();
        let recorded = aggregator
            .get("example.com")
            .map(|stats| stats.response_times().len())
            .unwrap_or(0);
        prop_assert_eq!(recorded, expected);
    }

    /// ドメインなしの結果は集計に影響しない
    #[test]
    fn unattributed_outcomes_are_ignored(count in 0usize..20) {
        let mut aggregator = StatsAggregator::new();
        for _ in 0..count {
            prop_assert!(!aggregator.record(&ProbeOutcome::unattributed()));
        }
        prop_assert!(aggregator.is_empty());
    }

    /// 同じ入力なら同じ判定
    #[test]
    fn classify_is_pure(code in 100u16..600, elapsed_ms in 0u64..2_000) {
        let elapsed = Duration::from_millis(elapsed_ms);
        let first = classify(code, elapsed, UP_LATENCY_THRESHOLD);
        let second = classify(code, elapsed, UP_LATENCY_THRESHOLD);
        prop_assert_eq!(first, second);

        let expected_up = (200..300).contains(&code) && elapsed_ms <= 500;
        prop_assert_eq!(first == ProbeStatus::Up, expected_up);
    }
}
