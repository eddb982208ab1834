// src/checks/list.rs

//! List：左端 FIFO，右端 LIFO

use redis::AsyncCommands;

use crate::conn::Probe;
use crate::error::{ProbeError, expect_eq};

const KEY: &str = "names";

pub async fn run(probe: &mut Probe) -> Result<(), ProbeError> {
    probe.purge(&[KEY]).await?;
    let key = probe.key(KEY);

    // RPUSH 逐个追加，返回值是追加后的长度
    for (i, name) in ["Eko", "Kurniawan", "Khannedy"].into_iter().enumerate() {
        let len: usize = probe.conn().rpush(&key, name).await?;
        expect_eq("rpush length", i + 1, len)?;
    }

    let first: Option<String> = probe.conn().lpop(&key, None).await?;
    expect_eq("lpop", Some("Eko"), first.as_deref())?;

    let last: Option<String> = probe.conn().rpop(&key, None).await?;
    expect_eq("rpop", Some("Khannedy"), last.as_deref())?;

    let last: Option<String> = probe.conn().rpop(&key, None).await?;
    expect_eq("rpop", Some("Kurniawan"), last.as_deref())?;

    // 弹空之后 key 自动消失
    let len: usize = probe.conn().llen(&key).await?;
    expect_eq("llen after pops", 0, len)?;

    probe.purge(&[KEY]).await?;
    Ok(())
}
