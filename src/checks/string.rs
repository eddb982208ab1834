// src/checks/string.rs

//! String + 过期
//!
//! 两个子场景：
//! - SETEX name "Reo Sahobby" 3s，TTL 内 GET 必须读到原值
//! - SETEX address "Jakarta Selatan" 2s，等待超过 TTL 后 GET 必须报"不存在"

use std::time::Duration;

use redis::AsyncCommands;
use tracing::debug;

use crate::conn::Probe;
use crate::error::{ProbeError, expect_eq};

/// 可读场景使用的 TTL
pub const LONG_TTL_SECS: u64 = 3;
/// 过期场景使用的 TTL，等待时间必须严格大于它
pub const SHORT_TTL_SECS: u64 = 2;

pub async fn run(probe: &mut Probe, wait: Duration) -> Result<(), ProbeError> {
    set_then_read(probe).await?;
    set_then_expire(probe, wait).await
}

/// TTL 内读到刚写入的值
pub async fn set_then_read(probe: &mut Probe) -> Result<(), ProbeError> {
    let name = "Reo Sahobby";
    probe.purge(&["name"]).await?;

    let key = probe.key("name");
    let _: () = probe.conn().set_ex(&key, name, LONG_TTL_SECS).await?;

    let got = probe.fetch("name").await?;
    expect_eq("get before ttl", name, got.as_str())?;

    // TTL 已设置且不超过写入时的值
    let ttl: i64 = probe.conn().ttl(&key).await?;
    expect_eq("ttl in range", true, ttl > 0 && ttl <= LONG_TTL_SECS as i64)?;

    probe.purge(&["name"]).await?;
    Ok(())
}

/// TTL 过后读取：唯一一处把错误当作期望结果
pub async fn set_then_expire(probe: &mut Probe, wait: Duration) -> Result<(), ProbeError> {
    probe.purge(&["address"]).await?;

    let key = probe.key("address");
    let _: () = probe.conn().set_ex(&key, "Jakarta Selatan", SHORT_TTL_SECS).await?;

    debug!(?wait, key = %key, "waiting for ttl to elapse");
    tokio::time::sleep(wait).await;

    let (value, err) = match probe.fetch("address").await {
        Ok(v) => (v, None),
        Err(e) if e.is_absent() => (String::new(), Some(e)),
        Err(e) => return Err(e),
    };
    expect_eq("get after ttl", "", value.as_str())?;
    expect_eq("absent after ttl", true, err.is_some())
}
