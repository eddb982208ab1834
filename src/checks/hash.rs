// src/checks/hash.rs

//! Hash：一次写入整张映射，HGETALL 读回完全相同的字段集合（顺序无关）

use std::collections::HashMap;

use redis::AsyncCommands;

use crate::conn::Probe;
use crate::error::{ProbeError, expect_eq};

const KEY: &str = "user.1";

pub async fn run(probe: &mut Probe) -> Result<(), ProbeError> {
    probe.purge(&[KEY]).await?;
    let key = probe.key(KEY);

    let fields = [("id", "1"), ("name", "Eko"), ("email", "eko@example.com")];
    let _: () = probe.conn().hset_multiple(&key, &fields).await?;

    let all: HashMap<String, String> = probe.conn().hgetall(&key).await?;
    let expected: HashMap<String, String> = fields
        .iter()
        .map(|(f, v)| (f.to_string(), v.to_string()))
        .collect();
    expect_eq("hgetall", expected, all)?;

    probe.purge(&[KEY]).await?;
    Ok(())
}
