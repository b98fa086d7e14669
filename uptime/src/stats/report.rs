//! サイクルレポート
//!
//! 1サイクル終了時点の累積統計を人間向けの行に整形する

use std::time::Duration;

/// サイクル境界を示す区切り行
pub const CYCLE_SEPARATOR: &str = "---";

/// ドメイン単位のレポート
#[derive(Debug, Clone, PartialEq)]
pub struct DomainReport {
    /// ドメイン
    pub domain: String,
    /// 可用性（%）
    pub availability: f64,
    /// 平均応答時間（サンプルがなければNone）
    pub average_response_time: Option<Duration>,
}

impl DomainReport {
    /// 可用性の行（小数点以下2桁）
    pub fn availability_line(&self) -> String {
        format!(
            "{} has {:.2}% availability percentage",
            self.domain, self.availability
        )
    }

    /// 平均応答時間の行（小数点以下3桁、サンプルがなければNone）
    pub fn average_response_time_line(&self) -> Option<String> {
        self.average_response_time.map(|avg| {
            format!(
                "{} average response time: {:.3} seconds",
                self.domain,
                avg.as_secs_f64()
            )
        })
    }
}

/// 1サイクル分のレポート
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// サイクル番号（1始まり）
    pub cycle: u64,
    /// 観測済み全ドメインのレポート
    pub domains: Vec<DomainReport>,
}

impl CycleReport {
    /// 出力行（末尾は区切り行）
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.domains.len() * 2 + 1);
        for domain in &self.domains {
            lines.push(domain.availability_line());
            if let Some(line) = domain.average_response_time_line() {
                lines.push(line);
            }
        }
        lines.push(CYCLE_SEPARATOR.to_string());
        lines
    }
}
