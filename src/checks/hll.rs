// src/checks/hll.rs

//! HyperLogLog：三次 PFADD 有重叠，共 6 个不同元素，PFCOUNT 应为 6

use redis::AsyncCommands;

use crate::conn::Probe;
use crate::error::{ProbeError, expect_eq};

const KEY: &str = "visitors";

const BATCHES: [&[&str]; 3] = [
    &["eko", "kurniawan", "khannedy"],
    &["eko", "budi", "joko"],
    &["rully", "joko", "budi"],
];

pub async fn run(probe: &mut Probe) -> Result<(), ProbeError> {
    probe.purge(&[KEY]).await?;
    let key = probe.key(KEY);

    for batch in BATCHES {
        let _: () = probe.conn().pfadd(&key, batch).await?;
    }

    // 元素很少时估计值是精确的
    let count: usize = probe.conn().pfcount(&key).await?;
    expect_eq("pfcount", 6, count)?;

    probe.purge(&[KEY]).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn batches_hold_six_distinct_items() {
        let distinct: HashSet<&str> = BATCHES.iter().flat_map(|b| b.iter().copied()).collect();
        assert_eq!(distinct.len(), 6);
    }
}
