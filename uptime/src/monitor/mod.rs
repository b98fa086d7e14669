//! ポーリングサイクルのスケジューラー
//!
//! 設定された全エンドポイントを1サイクルごとにプローブし、結果を
//! `StatsAggregator`へ畳み込み、累積レポートを出力してから一定時間スリープする。
//! 停止は`ShutdownController`経由でのみ行われる。

use crate::common::error::MonitorError;
use crate::config::{MonitorSettings, ProbeMode};
use crate::health::HealthProber;
use crate::shutdown::ShutdownController;
use crate::stats::{CycleReport, StatsAggregator};
use crate::types::endpoint::EndpointSpec;
use futures::future::join_all;
use tracing::{debug, info, warn};

/// エンドポイントモニター
///
/// 集計状態を単独で所有し、実行開始から停止まで保持する。
pub struct Monitor {
    /// プローブ対象（設定順）
    endpoints: Vec<EndpointSpec>,
    /// プローバー
    prober: HealthProber,
    /// ドメイン統計
    stats: StatsAggregator,
    /// モニター設定
    settings: MonitorSettings,
    /// 停止シグナル
    shutdown: ShutdownController,
    /// 完了したサイクル数
    cycles_completed: u64,
}

impl Monitor {
    /// 新しいモニターを作成
    pub fn new(
        endpoints: Vec<EndpointSpec>,
        settings: MonitorSettings,
        shutdown: ShutdownController,
    ) -> Result<Self, MonitorError> {
        let prober = HealthProber::new()?.with_latency_threshold(settings.latency_threshold);
        Ok(Self::with_prober(endpoints, prober, settings, shutdown))
    }

    /// プローバーを指定して作成
    pub fn with_prober(
        endpoints: Vec<EndpointSpec>,
        prober: HealthProber,
        settings: MonitorSettings,
        shutdown: ShutdownController,
    ) -> Self {
        Self {
            endpoints,
            prober,
            stats: StatsAggregator::new(),
            settings,
            shutdown,
            cycles_completed: 0,
        }
    }

    /// 現在の集計状態
    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }

    /// 完了したサイクル数
    pub fn cycles_completed(&self) -> u64 {
        self.cycles_completed
    }

    /// モニター設定
    pub fn settings(&self) -> &MonitorSettings {
        &self.settings
    }

    /// 停止要求まで サイクル → レポート → スリープ を繰り返す
    ///
    /// 停止要求はプローブ中・スリープ中のどちらでも即座に反映される。
    /// 中断されたサイクルのレポートは出力しない。
    pub async fn run(&mut self) {
        let shutdown = self.shutdown.clone();

        info!(
            endpoints = self.endpoints.len(),
            interval_secs = self.settings.check_interval.as_secs_f64(),
            probe_mode = ?self.settings.probe_mode,
            "Endpoint monitor started"
        );
        if self.endpoints.is_empty() {
            warn!("No endpoints configured; reports will be empty");
        }

        loop {
            let report = tokio::select! {
                biased;
                _ = shutdown.wait() => break,
                report = self.run_cycle() => report,
            };

            emit_report(&report);

            tokio::select! {
                biased;
                _ = shutdown.wait() => break,
                _ = tokio::time::sleep(self.settings.check_interval) => {}
            }
        }

        info!(
            cycles = self.cycles_completed,
            domains = self.stats.len(),
            "Endpoint monitor stopped"
        );
    }

    /// 1サイクル分のプローブと集計を行い、累積レポートを返す
    pub async fn run_cycle(&mut self) -> CycleReport {
        match self.settings.probe_mode {
            ProbeMode::Sequential => {
                for endpoint in &self.endpoints {
                    let outcome = self.prober.probe(endpoint).await;
                    self.stats.record(&outcome);
                }
            }
            ProbeMode::Concurrent => {
                // 全プローブ完了後に設定順で畳み込む（書き込みはこのタスクのみ）
                let prober = &self.prober;
                let outcomes = join_all(self.endpoints.iter().map(|e| prober.probe(e))).await;
                for outcome in &outcomes {
                    self.stats.record(outcome);
                }
            }
        }

        self.cycles_completed += 1;
        debug!(
            cycle = self.cycles_completed,
            domains = self.stats.len(),
            "Cycle completed"
        );
        self.stats.report(self.cycles_completed)
    }
}

/// レポートをログに出力
fn emit_report(report: &CycleReport) {
    for line in report.lines() {
        info!("{}", line);
    }
}
