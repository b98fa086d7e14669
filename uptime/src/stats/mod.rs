//! ドメイン単位の統計集計
//!
//! プローブ結果をドメインごとのUP/DOWNカウンタと応答時間サンプルに畳み込む。
//! マップの所有者は`StatsAggregator`のみで、エントリは初回観測時に作成され
//! 実行中に削除されることはない。

/// サイクルレポート
pub mod report;

pub use report::{CycleReport, DomainReport, CYCLE_SEPARATOR};

use crate::types::endpoint::{ProbeOutcome, ProbeStatus};
use std::collections::BTreeMap;
use std::time::Duration;

/// 単一ドメインの累積統計
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainStats {
    up_count: u64,
    down_count: u64,
    response_times: Vec<Duration>,
}

impl DomainStats {
    /// 1回分のプローブ結果を加算
    pub fn record(&mut self, status: ProbeStatus, response_time: Option<Duration>) {
        match status {
            ProbeStatus::Up => self.up_count += 1,
            ProbeStatus::Down => self.down_count += 1,
        }
        if let Some(elapsed) = response_time {
            self.response_times.push(elapsed);
        }
    }

    /// UP回数
    pub fn up_count(&self) -> u64 {
        self.up_count
    }

    /// DOWN回数
    pub fn down_count(&self) -> u64 {
        self.down_count
    }

    /// 総プローブ回数
    pub fn total_count(&self) -> u64 {
        self.up_count + self.down_count
    }

    /// 記録済みの応答時間サンプル
    pub fn response_times(&self) -> &[Duration] {
        &self.response_times
    }

    /// 可用性（%、0〜100）
    ///
    /// プローブ実績がなければ0。
    pub fn availability(&self) -> f64 {
        let total = self.total_count();
        if total == 0 {
            return 0.0;
        }
        100.0 * self.up_count as f64 / total as f64
    }

    /// 平均応答時間（サンプルがなければNone）
    pub fn average_response_time(&self) -> Option<Duration> {
        if self.response_times.is_empty() {
            return None;
        }
        let total_secs: f64 = self.response_times.iter().map(Duration::as_secs_f64).sum();
        Some(Duration::from_secs_f64(
            total_secs / self.response_times.len() as f64,
        ))
    }
}

/// ドメイン統計の集計器
///
/// レポートはドメイン名の昇順で出力される。
#[derive(Debug, Default)]
pub struct StatsAggregator {
    domains: BTreeMap<String, DomainStats>,
}

impl StatsAggregator {
    /// 空の集計器を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// プローブ結果を畳み込む
    ///
    /// ドメインを持たない結果は集計対象外とし、`false`を返す。
    pub fn record(&mut self, outcome: &ProbeOutcome) -> bool {
        let Some(domain) = outcome.domain.as_deref() else {
            return false;
        };
        self.domains
            .entry(domain.to_string())
            .or_default()
            .record(outcome.status, outcome.response_time);
        true
    }

    /// 指定ドメインの統計
    pub fn get(&self, domain: &str) -> Option<&DomainStats> {
        self.domains.get(domain)
    }

    /// 観測済みドメインと統計の一覧
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DomainStats)> {
        self.domains.iter().map(|(domain, stats)| (domain.as_str(), stats))
    }

    /// 観測済みドメイン数
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// 観測済みドメインがないか
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// 実行開始からの累積値でレポートを作成
    pub fn report(&self, cycle: u64) -> CycleReport {
        let domains = self
            .iter()
            .map(|(domain, stats)| DomainReport {
                domain: domain.to_string(),
                availability: stats.availability(),
                average_response_time: stats.average_response_time(),
            })
            .collect();
        CycleReport { cycle, domains }
    }
}
