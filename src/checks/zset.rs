// src/checks/zset.rs

//! Sorted set：ZRANGE 按分数升序，ZPOPMAX 每次弹出当前最高分

use redis::AsyncCommands;

use crate::conn::Probe;
use crate::error::{ProbeError, expect_eq};

const KEY: &str = "scores";

pub async fn run(probe: &mut Probe) -> Result<(), ProbeError> {
    probe.purge(&[KEY]).await?;
    let key = probe.key(KEY);

    for (member, score) in [("Eko", 100), ("Budi", 85), ("Joko", 95)] {
        let added: i64 = probe.conn().zadd(&key, member, score).await?;
        expect_eq("zadd", 1, added)?;
    }

    let ascending: Vec<String> = probe.conn().zrange(&key, 0, -1).await?;
    expect_eq("zrange", vec!["Budi", "Joko", "Eko"], ascending.iter().map(String::as_str).collect())?;

    for expected in ["Eko", "Joko", "Budi"] {
        // 回复是扁平的 [member, score]
        let popped: Vec<String> = probe.conn().zpopmax(&key, 1).await?;
        expect_eq("zpopmax", Some(expected), popped.first().map(String::as_str))?;
    }

    // 三次弹出后集合为空
    let card: i64 = probe.conn().zcard(&key).await?;
    expect_eq("zcard after pops", 0, card)?;

    probe.purge(&[KEY]).await?;
    Ok(())
}
