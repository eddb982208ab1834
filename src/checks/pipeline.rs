// src/checks/pipeline.rs

//! Pipeline / 事务
//!
//! 把两条 SETEX 放进同一批次一次性发出，批次内排在后面的 GET
//! 必须看到前面的写入；批次执行完后单独的读也必须看到。
//! `atomic` 为 true 时批次包在 MULTI/EXEC 里。

use redis::Pipeline;

use crate::conn::Probe;
use crate::error::{ProbeError, expect_eq};

/// 批次内 SETEX 使用的 TTL（秒）
pub const BATCH_TTL_SECS: u64 = 5;

const KEYS: [&str; 2] = ["name", "address"];

/// (name, address) 两个 key 要写入的值
fn fixture(atomic: bool) -> (&'static str, &'static str) {
    if atomic { ("Joko", "Cirebon") } else { ("Eko", "Indonesia") }
}

/// 组装批次：两次写入，随后两次读取
pub fn build(probe: &Probe, atomic: bool) -> Pipeline {
    let (name, address) = fixture(atomic);
    let mut pipe = redis::pipe();
    if atomic {
        pipe.atomic();
    }
    pipe.set_ex(probe.key("name"), name, BATCH_TTL_SECS).ignore()
        .set_ex(probe.key("address"), address, BATCH_TTL_SECS).ignore()
        .get(probe.key("name"))
        .get(probe.key("address"));
    pipe
}

pub async fn run(probe: &mut Probe, atomic: bool) -> Result<(), ProbeError> {
    probe.purge(&KEYS).await?;
    let (name, address) = fixture(atomic);

    let pipe = build(probe, atomic);
    let (in_batch_name, in_batch_address): (Option<String>, Option<String>) =
        pipe.query_async(probe.conn()).await?;
    expect_eq("read inside batch", Some(name), in_batch_name.as_deref())?;
    expect_eq("read inside batch", Some(address), in_batch_address.as_deref())?;

    // 批次之后的普通读取
    expect_eq("get after batch", name, probe.fetch("name").await?.as_str())?;
    expect_eq("get after batch", address, probe.fetch("address").await?.as_str())?;

    probe.purge(&KEYS).await?;
    Ok(())
}
