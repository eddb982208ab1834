// src/error.rs

//! 探针错误类型
//!
//! 两类错误要区分开：
//! - 基础设施错误（连接失败、命令报错）：检查立即失败
//! - 预期缺失（TTL 过后读 key）：这是唯一一种"报错才对"的情况

use std::fmt::Debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    /// 底层客户端返回的任何错误
    #[error("store error: {0}")]
    Store(#[from] redis::RedisError),

    #[error("timed out connecting to {addr} after {timeout_ms}ms")]
    ConnectTimeout { addr: String, timeout_ms: u64 },

    /// key 不存在（过期或从未写入）
    #[error("key '{0}' does not exist")]
    Absent(String),

    /// 观察值与字面量期望不一致
    #[error("{what}: expected {expected}, got {actual}")]
    Mismatch {
        what: String,
        expected: String,
        actual: String,
    },

    #[error("unknown capability '{0}'")]
    UnknownCapability(String),
}

impl ProbeError {
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, ProbeError::Store(_) | ProbeError::ConnectTimeout { .. })
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ProbeError::Absent(_))
    }
}

/// 断言相等，不等时返回 Mismatch
pub fn expect_eq<T>(what: &str, expected: T, actual: T) -> Result<(), ProbeError>
where
    T: PartialEq + Debug,
{
    if expected == actual {
        Ok(())
    } else {
        Err(ProbeError::Mismatch {
            what: what.to_string(),
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_eq() {
        assert!(expect_eq("len", 3, 3).is_ok());

        let err = expect_eq("lpop", Some("Eko"), None).unwrap_err();
        assert_eq!(err.to_string(), "lpop: expected Some(\"Eko\"), got None");
        assert!(!err.is_infrastructure());
    }

    #[test]
    fn test_classification() {
        let absent = ProbeError::Absent("address".into());
        assert!(absent.is_absent());
        assert!(!absent.is_infrastructure());

        let timeout = ProbeError::ConnectTimeout { addr: "localhost:6379/0".into(), timeout_ms: 10 };
        assert!(timeout.is_infrastructure());
        assert!(!timeout.is_absent());

        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let store = ProbeError::from(redis::RedisError::from(io));
        assert!(store.is_infrastructure());
    }
}
