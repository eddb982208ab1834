// src/lib.rs
//! crab-probe 库：config / conn / checks / runner / report

pub mod config;  // 配置加载
pub mod error;   // 错误分类
pub mod conn;    // 单个连接
pub mod checks;  // 各数据结构的检查
pub mod runner;  // 顺序执行
pub mod report;  // 结果汇总

pub use checks::Capability;
pub use config::Config;
pub use error::ProbeError;
pub use report::{Outcome, Report};
