// src/checks/mod.rs

//! # 检查模块
//!
//! 每种数据结构能力对应一个检查：
//! - 打开一个新连接
//! - 清理自己要用的 key
//! - 按固定顺序发出写命令、读命令
//! - 把观察值与字面量期望逐一比较
//!
//! 任一断言失败或底层报错，检查立即结束，不重试。

pub mod geo;
pub mod hash;
pub mod hll;
pub mod list;
pub mod pipeline;
pub mod set;
pub mod string;
pub mod zset;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::conn::Probe;
use crate::error::{ProbeError, expect_eq};

/// 被检查的能力类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Connection,
    Ping,
    String,
    List,
    Set,
    #[serde(rename = "zset")]
    SortedSet,
    Hash,
    Geo,
    HyperLogLog,
    Pipeline,
    Transaction,
}

impl Capability {
    /// 默认的执行顺序
    pub const ALL: [Capability; 11] = [
        Capability::Connection,
        Capability::Ping,
        Capability::String,
        Capability::List,
        Capability::Set,
        Capability::SortedSet,
        Capability::Hash,
        Capability::Geo,
        Capability::HyperLogLog,
        Capability::Pipeline,
        Capability::Transaction,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Capability::Connection => "connection",
            Capability::Ping => "ping",
            Capability::String => "string",
            Capability::List => "list",
            Capability::Set => "set",
            Capability::SortedSet => "zset",
            Capability::Hash => "hash",
            Capability::Geo => "geo",
            Capability::HyperLogLog => "hyperloglog",
            Capability::Pipeline => "pipeline",
            Capability::Transaction => "transaction",
        }
    }

    /// 一句话说明，用于 --list
    pub fn describe(&self) -> &'static str {
        match self {
            Capability::Connection => "a client can be opened against the endpoint",
            Capability::Ping => "PING answers PONG",
            Capability::String => "SETEX value readable before TTL, absent after",
            Capability::List => "RPUSH x3 then LPOP/RPOP/RPOP",
            Capability::Set => "SADD with a duplicate, SCARD and SMEMBERS",
            Capability::SortedSet => "ZADD x3, ZRANGE ascending, ZPOPMAX descending",
            Capability::Hash => "HSET mapping then HGETALL",
            Capability::Geo => "GEOADD x2, GEODIST in km, GEOSEARCH by radius",
            Capability::HyperLogLog => "PFADD across three calls then PFCOUNT",
            Capability::Pipeline => "batched SETEX x2 observed by later reads",
            Capability::Transaction => "MULTI/EXEC batched SETEX x2 observed by later reads",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Capability {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cap = match s.trim().to_lowercase().as_str() {
            "connection" | "client" => Capability::Connection,
            "ping" => Capability::Ping,
            "string" | "strings" => Capability::String,
            "list" => Capability::List,
            "set" => Capability::Set,
            "zset" | "sorted-set" | "sortedset" => Capability::SortedSet,
            "hash" => Capability::Hash,
            "geo" => Capability::Geo,
            "hyperloglog" | "hll" | "pf" => Capability::HyperLogLog,
            "pipeline" => Capability::Pipeline,
            "transaction" | "multi" | "tx" => Capability::Transaction,
            _ => return Err(ProbeError::UnknownCapability(s.to_string())),
        };
        Ok(cap)
    }
}

/// 打开新连接并执行一项检查
pub async fn run(cap: Capability, cfg: &Config) -> Result<(), ProbeError> {
    let mut probe = Probe::open(cfg).await?;
    debug!(check = %cap, "dispatching");

    match cap {
        // 能打开连接就算通过，probe 在这里被 drop
        Capability::Connection => Ok(()),
        Capability::Ping => {
            let pong = probe.ping().await?;
            expect_eq("ping", "PONG", pong.as_str())
        }
        Capability::String => string::run(&mut probe, cfg.expiry_wait()).await,
        Capability::List => list::run(&mut probe).await,
        Capability::Set => set::run(&mut probe, cfg.strict_set_order).await,
        Capability::SortedSet => zset::run(&mut probe).await,
        Capability::Hash => hash::run(&mut probe).await,
        Capability::Geo => geo::run(&mut probe).await,
        Capability::HyperLogLog => hll::run(&mut probe).await,
        Capability::Pipeline => pipeline::run(&mut probe, false).await,
        Capability::Transaction => pipeline::run(&mut probe, true).await,
    }
}
