// src/conn.rs

//! 与被测存储之间的单个连接
//!
//! 每个检查独立打开一个 `Probe`，用完即丢弃；
//! drop 时底层连接随之释放，不需要显式关闭。

use redis::{AsyncCommands, Client, aio::MultiplexedConnection};
use tokio::time::timeout;
use tracing::debug;

use crate::config::Config;
use crate::error::ProbeError;

/// 一个打开的连接 + 键前缀
pub struct Probe {
    conn: MultiplexedConnection,
    prefix: String,
}

impl Probe {
    /// 打开到配置中目标地址的连接，超时由 connect_timeout_ms 控制
    pub async fn open(cfg: &Config) -> Result<Self, ProbeError> {
        let client = Client::open(cfg.connection_info())?;
        let conn = match timeout(cfg.connect_timeout(), client.get_multiplexed_async_connection()).await {
            Ok(conn) => conn?,
            Err(_) => {
                return Err(ProbeError::ConnectTimeout {
                    addr: cfg.target(),
                    timeout_ms: cfg.connect_timeout_ms,
                });
            }
        };
        debug!(endpoint = %cfg.target(), "connection opened");

        Ok(Probe {
            conn,
            prefix: cfg.key_prefix.clone(),
        })
    }

    /// 给检查使用的原始连接
    pub fn conn(&mut self) -> &mut MultiplexedConnection {
        &mut self.conn
    }

    /// 加上前缀后的实际 key
    pub fn key(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    pub async fn ping(&mut self) -> Result<String, ProbeError> {
        let pong: String = redis::cmd("PING").query_async(&mut self.conn).await?;
        Ok(pong)
    }

    /// GET，key 不存在时返回 `ProbeError::Absent`
    pub async fn fetch(&mut self, name: &str) -> Result<String, ProbeError> {
        let key = self.key(name);
        let value: Option<String> = self.conn.get(&key).await?;
        value.ok_or(ProbeError::Absent(key))
    }

    /// 删除一组 key，返回实际删除的个数
    pub async fn purge(&mut self, names: &[&str]) -> Result<usize, ProbeError> {
        if names.is_empty() {
            return Ok(0);
        }
        let keys: Vec<String> = names.iter().map(|n| self.key(n)).collect();
        let removed: usize = self.conn.del(&keys).await?;
        Ok(removed)
    }
}
