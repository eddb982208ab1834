// src/report.rs

//! 运行结果汇总：文本（`# Section` + `key:value`）或 JSON

use std::time::Duration;

use serde::Serialize;

use crate::checks::Capability;
use crate::error::ProbeError;

/// 单项检查的结果
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub capability: Capability,
    pub passed: bool,
    pub elapsed_ms: u64,
    /// 耗时超过 slow_threshold_ms
    pub slow: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 失败是否来自基础设施（连接、命令报错）而不是断言
    pub infrastructure: bool,
}

impl Outcome {
    pub fn new(
        capability: Capability,
        result: Result<(), ProbeError>,
        elapsed: Duration,
        slow_threshold: Duration,
    ) -> Self {
        let infrastructure = matches!(&result, Err(e) if e.is_infrastructure());
        Outcome {
            capability,
            passed: result.is_ok(),
            elapsed_ms: elapsed.as_millis() as u64,
            slow: elapsed > slow_threshold,
            error: result.err().map(|e| e.to_string()),
            infrastructure,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub target: String,
    pub outcomes: Vec<Outcome>,
}

impl Report {
    pub fn new(target: impl Into<String>) -> Self {
        Report { target: target.into(), outcomes: Vec::new() }
    }

    pub fn push(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    pub fn get(&self, cap: Capability) -> Option<&Outcome> {
        self.outcomes.iter().find(|o| o.capability == cap)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn render(&self) -> String {
        let mut response = String::new();

        response.push_str("# Probe\n");
        response.push_str(&format!("target:{}\n", self.target));
        response.push_str(&format!("checks:{}\n", self.outcomes.len()));
        response.push_str(&format!("passed:{}\n", self.passed()));
        response.push_str(&format!("failed:{}\n", self.failed()));

        response.push_str("# Results\n");
        for o in &self.outcomes {
            let status = if o.passed { "ok" } else { "FAILED" };
            response.push_str(&format!("{}:{} {}ms", o.capability, status, o.elapsed_ms));
            if o.slow {
                response.push_str(" slow");
            }
            if let Some(err) = &o.error {
                response.push_str(&format!(" {}", err));
            }
            response.push('\n');
        }

        response
    }
}
