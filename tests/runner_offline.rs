// tests/runner_offline.rs

//! 集成测试：目标不可达时的行为
//! - 每项检查都以基础设施错误失败，不 panic、不重试
//! - 报告仍然覆盖所有被请求的检查

use std::net::TcpListener;

use anyhow::Result;

use crab_probe::conn::Probe;
use crab_probe::{Capability, Config, runner};

/// 绑定 0 端口拿到一个空闲端口，随即释放，之后没人监听
fn dead_port() -> Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}

fn unreachable_config() -> Result<Config> {
    Ok(Config {
        host: "127.0.0.1".into(),
        port: dead_port()?,
        connect_timeout_ms: 1000,
        ..Config::default()
    })
}

#[tokio::test]
async fn test_open_fails_with_infrastructure_error() -> Result<()> {
    let cfg = unreachable_config()?;
    let err = match Probe::open(&cfg).await {
        Ok(_) => panic!("nothing listens on {}", cfg.target()),
        Err(e) => e,
    };
    assert!(err.is_infrastructure(), "unexpected error: {}", err);
    assert!(!err.is_absent());
    Ok(())
}

#[tokio::test]
async fn test_runner_reports_every_failure() -> Result<()> {
    let cfg = unreachable_config()?;
    let caps = [Capability::Ping, Capability::List, Capability::Pipeline];

    let report = runner::run(&cfg, &caps).await;
    assert_eq!(report.outcomes.len(), caps.len());
    assert_eq!(report.failed(), caps.len());
    assert!(!report.all_passed());

    for (outcome, cap) in report.outcomes.iter().zip(caps) {
        assert_eq!(outcome.capability, cap);
        assert!(outcome.infrastructure);
        assert!(outcome.error.is_some());
    }

    let text = report.render();
    assert!(text.contains(&format!("target:{}", cfg.target())));
    assert!(text.contains("ping:FAILED"));
    Ok(())
}

#[tokio::test]
async fn test_json_report_shape() -> Result<()> {
    let cfg = unreachable_config()?;
    let report = runner::run(&cfg, &[Capability::Connection]).await;

    let v: serde_json::Value = serde_json::from_str(&report.to_json()?)?;
    assert_eq!(v["outcomes"][0]["capability"], "connection");
    assert_eq!(v["outcomes"][0]["passed"], false);
    assert_eq!(v["outcomes"][0]["infrastructure"], true);
    Ok(())
}
