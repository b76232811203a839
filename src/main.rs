//! hrp-plan：從 JSON 請求產生資源規劃

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use hrp::{Planner, PlannerConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "hrp-plan", version, about = "Hospital resource planner")]
struct Args {
    /// 請求 JSON 檔案（省略時從標準輸入讀取）
    input: Option<PathBuf>,

    /// ILP 求解時限（毫秒）
    #[arg(long, env = "HRP_SOLVER_TIMEOUT_MS", default_value_t = 5000)]
    timeout_ms: u64,

    /// 跳過求解器，只使用貪婪估算
    #[arg(long)]
    heuristic_only: bool,

    /// 格式化輸出
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    // 日誌寫到 stderr，stdout 只輸出 JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let raw = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("無法讀取請求檔案 {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("無法從標準輸入讀取請求")?;
            buf
        }
    };

    let config = PlannerConfig::default()
        .with_solver_timeout(Duration::from_millis(args.timeout_ms))
        .with_optimizer(!args.heuristic_only);
    let planner = Planner::new(config);

    let response = planner.plan_json(&raw).context("請求驗證失敗")?;

    let output = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{output}");

    Ok(())
}
