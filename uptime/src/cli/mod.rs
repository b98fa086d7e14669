//! CLI module for uptime
//!
//! Provides the command-line interface of the monitor binary.

use crate::config::{MonitorSettings, ProbeMode, DEFAULT_CHECK_INTERVAL_SECS};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// uptime - Periodic HTTP endpoint availability monitor
#[derive(Parser, Debug)]
#[command(name = "uptime")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    UPTIME_LOG_LEVEL              Log level / filter (default: info, falls back to RUST_LOG)
    UPTIME_CHECK_INTERVAL_SECS    Seconds between polling cycles (default: 15)
    UPTIME_CONCURRENT_PROBES      Probe endpoints of a cycle concurrently (default: false)
"#)]
pub struct Cli {
    /// YAML file listing the endpoints to probe
    #[arg(value_name = "CONFIG_FILE")]
    pub config: PathBuf,

    /// Seconds to sleep between polling cycles
    #[arg(
        long,
        env = "UPTIME_CHECK_INTERVAL_SECS",
        default_value_t = DEFAULT_CHECK_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval_secs: u64,

    /// Probe all endpoints of a cycle concurrently
    #[arg(long, env = "UPTIME_CONCURRENT_PROBES")]
    pub concurrent: bool,
}

impl Cli {
    /// CLI引数からモニター設定を作成
    pub fn settings(&self) -> MonitorSettings {
        let probe_mode = if self.concurrent {
            ProbeMode::Concurrent
        } else {
            ProbeMode::Sequential
        };
        MonitorSettings::default()
            .with_interval(Duration::from_secs(self.interval_secs))
            .with_probe_mode(probe_mode)
    }
}
