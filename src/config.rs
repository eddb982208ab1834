// src/config.rs

//! 探针配置：目标地址、键前缀、超时与过期等待
//!
//! 配置文件为 JSON，文件不存在时写入默认配置；
//! 之后可以被环境变量和命令行参数覆盖。

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::Path,
    time::Duration,
};
use anyhow::{Context, Result, ensure};
use redis::{ConnectionAddr, ConnectionInfo, RedisConnectionInfo};

use crate::checks::string::SHORT_TTL_SECS;

/// 进程启动后读到的全局配置
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 目标主机
    pub host: String,
    /// 目标端口
    pub port: u16,
    /// 编号 keyspace
    pub db: i64,
    /// AUTH 密码（可选）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// 所有检查使用的键都会加上这个前缀
    pub key_prefix: String,
    /// 建立连接的超时（毫秒）
    pub connect_timeout_ms: u64,
    /// 过期检查中等待 TTL 流逝的时间（毫秒）
    pub expiry_wait_ms: u64,
    /// SMEMBERS 是否必须按首次插入顺序返回
    pub strict_set_order: bool,
    /// 超过该耗时的检查会在报告里标记为 slow
    pub slow_threshold_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "localhost".to_string(),
            port: 6379,
            db: 0,
            password: None,
            key_prefix: String::new(),
            connect_timeout_ms: 3000,
            expiry_wait_ms: 3000,
            strict_set_order: true,
            slow_threshold_ms: 5000,
        }
    }
}

impl Config {
    /// 用 CRAB_PROBE_* 环境变量覆盖目标地址
    pub fn apply_env(mut self) -> Result<Self> {
        if let Ok(host) = std::env::var("CRAB_PROBE_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("CRAB_PROBE_PORT") {
            self.port = port
                .parse()
                .with_context(|| format!("CRAB_PROBE_PORT is not a port: {:?}", port))?;
        }
        if let Ok(db) = std::env::var("CRAB_PROBE_DB") {
            self.db = db
                .parse()
                .with_context(|| format!("CRAB_PROBE_DB is not an integer: {:?}", db))?;
        }
        if let Ok(password) = std::env::var("CRAB_PROBE_PASSWORD") {
            self.password = Some(password);
        }
        Ok(self)
    }

    /// 检查配置是否能让所有检查有意义地运行
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.expiry_wait_ms > SHORT_TTL_SECS * 1000,
            "expiry_wait_ms ({}) must exceed the expiry TTL of {}s",
            self.expiry_wait_ms,
            SHORT_TTL_SECS
        );
        ensure!(self.connect_timeout_ms > 0, "connect_timeout_ms must be non-zero");
        ensure!(!self.host.is_empty(), "host must not be empty");
        ensure!(self.db >= 0, "db must be non-negative, got {}", self.db);
        Ok(())
    }

    /// 客户端连接参数
    ///
    /// 直接构造结构体而不拼 URL，密码和主机里的 `@` `/` `#` `:` 不需要转义
    pub fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            addr: ConnectionAddr::Tcp(self.host.clone(), self.port),
            redis: RedisConnectionInfo {
                db: self.db,
                password: self.password.clone(),
                ..Default::default()
            },
        }
    }

    /// 不带密码的地址，用于日志和报告
    pub fn target(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.db)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn expiry_wait(&self) -> Duration {
        Duration::from_millis(self.expiry_wait_ms)
    }

    pub fn slow_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_threshold_ms)
    }
}

/// 从指定路径读取并反序列化 JSON 配置
pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();

    // 如果配置文件不存在，创建默认配置
    if !path_ref.exists() {
        tracing::info!(path = ?path_ref, "config file not found, writing defaults");

        let default_cfg = Config::default();
        let default_json = serde_json::to_string_pretty(&default_cfg)?;
        fs::write(path_ref, default_json)
            .with_context(|| format!("Failed to write default config {:?}", path_ref))?;

        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path_ref)
        .with_context(|| format!("Failed to read config file {:?}", path_ref))?;
    let cfg: Config = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse {:?}", path_ref))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_creates_default() -> Result<()> {
        let tmp = tempdir()?;
        let path = tmp.path().join("probe.json");

        // 文件不存在：返回默认值并落盘
        let cfg = load(&path)?;
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        // 再读一次应得到同样的配置
        assert_eq!(load(&path)?, cfg);
        Ok(())
    }

    #[test]
    fn test_load_partial_file_uses_defaults() -> Result<()> {
        let tmp = tempdir()?;
        let path = tmp.path().join("probe.json");
        fs::write(&path, r#"{ "port": 6380, "key_prefix": "ci:" }"#)?;

        let cfg = load(&path)?;
        assert_eq!(cfg.port, 6380);
        assert_eq!(cfg.key_prefix, "ci:");
        assert_eq!(cfg.host, "localhost");
        assert_eq!(cfg.expiry_wait_ms, 3000);
        Ok(())
    }

    #[test]
    fn test_load_rejects_garbage() -> Result<()> {
        let tmp = tempdir()?;
        let path = tmp.path().join("probe.json");
        fs::write(&path, "not json")?;
        assert!(load(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_connection_info() {
        let cfg = Config::default();
        let info = cfg.connection_info();
        assert!(matches!(&info.addr, ConnectionAddr::Tcp(h, 6379) if h == "localhost"));
        assert_eq!(info.redis.db, 0);
        assert!(info.redis.password.is_none());
    }

    #[test]
    fn test_connection_info_keeps_special_password() -> Result<()> {
        let mut cfg = Config::default();
        cfg.password = Some("p@ss/w0rd#1".into());
        cfg.db = 2;

        let info = cfg.connection_info();
        assert_eq!(info.redis.password.as_deref(), Some("p@ss/w0rd#1"));
        assert_eq!(info.redis.db, 2);

        // 客户端能接受这份参数
        redis::Client::open(info)?;
        // target 不泄露密码
        assert_eq!(cfg.target(), "localhost:6379/2");
        Ok(())
    }

    #[test]
    fn test_validate_rejects_negative_db() {
        let mut cfg = Config::default();
        cfg.db = -1;
        assert!(cfg.validate().is_err());
        cfg.db = 15;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_default_slow_threshold_covers_expiry_wait() {
        let cfg = Config::default();
        assert!(cfg.slow_threshold() > cfg.expiry_wait());
    }

    #[test]
    fn test_validate() {
        let mut cfg = Config::default();
        assert!(cfg.validate().is_ok());

        // 等待时间必须严格大于短 TTL
        cfg.expiry_wait_ms = SHORT_TTL_SECS * 1000;
        assert!(cfg.validate().is_err());

        cfg.expiry_wait_ms = 3000;
        cfg.connect_timeout_ms = 0;
        assert!(cfg.validate().is_err());
    }
}
