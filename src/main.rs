// src/main.rs
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crab_probe::{Capability, config, runner};

/// 对运行中的 KV 存储逐项验证数据结构能力
#[derive(Parser)]
#[command(name = "crab-probe", version, about)]
struct Args {
    /// JSON 配置文件，不存在时写入默认配置
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 目标主机
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// 目标端口
    #[arg(short, long)]
    port: Option<u16>,

    /// keyspace 编号
    #[arg(short = 'n', long)]
    db: Option<i64>,

    /// 键前缀
    #[arg(long)]
    prefix: Option<String>,

    /// 只执行这些检查，逗号分隔
    #[arg(long, value_delimiter = ',')]
    only: Vec<Capability>,

    /// 以 JSON 输出报告
    #[arg(long)]
    json: bool,

    /// 列出所有检查后退出
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crab_probe=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.list {
        for cap in Capability::ALL {
            println!("{:<12} {}", cap.name(), cap.describe());
        }
        return Ok(ExitCode::SUCCESS);
    }

    // 配置优先级：命令行 > 环境变量 > 配置文件 > 默认值
    let cfg = match &args.config {
        Some(path) => config::load(path)?,
        None => config::Config::default(),
    };
    let mut cfg = cfg.apply_env()?;
    if let Some(host) = args.host {
        cfg.host = host;
    }
    if let Some(port) = args.port {
        cfg.port = port;
    }
    if let Some(db) = args.db {
        cfg.db = db;
    }
    if let Some(prefix) = args.prefix {
        cfg.key_prefix = prefix;
    }
    cfg.validate()?;

    let caps = if args.only.is_empty() {
        Capability::ALL.to_vec()
    } else {
        args.only
    };

    let report = runner::run(&cfg, &caps).await;
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render());
    }

    Ok(if report.all_passed() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
