// src/runner.rs

//! 顺序执行所选检查：
//! - 每项检查单独打开连接
//! - 计时，超过阈值标记 slow
//! - 某项失败不影响后续检查

use std::time::Instant;

use tracing::{info, warn};

use crate::checks::{self, Capability};
use crate::config::Config;
use crate::report::{Outcome, Report};

pub async fn run(cfg: &Config, caps: &[Capability]) -> Report {
    let mut report = Report::new(cfg.target());
    info!(endpoint = %cfg.target(), checks = caps.len(), "probe started");

    for &cap in caps {
        let start = Instant::now();
        let result = checks::run(cap, cfg).await;
        let outcome = Outcome::new(cap, result, start.elapsed(), cfg.slow_threshold());

        match &outcome.error {
            None => info!(check = %cap, elapsed_ms = outcome.elapsed_ms, slow = outcome.slow, "passed"),
            Some(err) => warn!(
                check = %cap,
                elapsed_ms = outcome.elapsed_ms,
                infrastructure = outcome.infrastructure,
                error = %err,
                "failed"
            ),
        }
        report.push(outcome);
    }

    info!(passed = report.passed(), failed = report.failed(), "probe finished");
    report
}

/// 便捷入口：按默认顺序执行全部检查
pub async fn run_all(cfg: &Config) -> Report {
    run(cfg, &Capability::ALL).await
}
