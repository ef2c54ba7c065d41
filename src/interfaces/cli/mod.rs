/// CLI Interface Module
///
/// Entry point for the standalone binary: parses arguments, initialises
/// logging, builds the engine and runs the load simulation against it.

use crate::engine::{EngineConfig, MatchingEngine, MAX_ORDERS_PER_SIDE, MAX_TICKERS};
use crate::interfaces::simulation::{self, SimulationConfig, SimulationError};
use crate::shared::error::ConfigError;
use crate::shared::metrics::METRICS;
use clap::Parser;
use std::sync::Arc;

/// 撮合核心命令行配置
#[derive(Parser, Debug, Clone)]
#[command(name = "ticker-matching-core")]
#[command(version = "0.1.0")]
#[command(about = "按股票分簿的并发撮合核心压测工具", long_about = None)]
pub struct CliConfig {
    /// 股票数量
    #[arg(short = 't', long, default_value_t = MAX_TICKERS)]
    pub max_tickers: usize,

    /// 每个订单簿每一侧的容量
    #[arg(short = 'c', long, default_value_t = MAX_ORDERS_PER_SIDE)]
    pub max_orders_per_side: usize,

    /// 下单线程数（0表示自动检测CPU核心数）
    #[arg(short = 'a', long, default_value_t = 4)]
    pub add_threads: usize,

    /// 每个下单线程的订单数
    #[arg(short = 'o', long, default_value_t = 1000)]
    pub orders_per_thread: usize,

    /// 撮合线程数（0表示自动检测CPU核心数）
    #[arg(short = 'm', long, default_value_t = 2)]
    pub match_threads: usize,

    /// 每个撮合线程的撮合次数
    #[arg(short = 'M', long, default_value_t = 1000)]
    pub matches_per_thread: usize,

    /// 随机种子（用于复现）
    #[arg(short = 's', long)]
    pub seed: Option<u64>,

    /// 不逐笔打印成交
    #[arg(short = 'q', long, default_value_t = false)]
    pub quiet: bool,

    /// 启用CPU亲和性绑定
    #[arg(long, default_value_t = false)]
    pub cpu_affinity: bool,

    /// 以JSON输出统计结果
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// 运行结束后输出Prometheus指标
    #[arg(long, default_value_t = false)]
    pub metrics: bool,

    /// 日志级别
    #[arg(short = 'l', long, default_value = "info", value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: String,

    /// 仅显示配置不运行（用于调试）
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

impl CliConfig {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_tickers: self.max_tickers,
            max_orders_per_side: self.max_orders_per_side,
        }
    }

    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            add_threads: resolve_threads(self.add_threads),
            orders_per_thread: self.orders_per_thread,
            match_threads: resolve_threads(self.match_threads),
            matches_per_thread: self.matches_per_thread,
            seed: self.seed,
            report_matches: !self.quiet,
            cpu_affinity: self.cpu_affinity,
            ..Default::default()
        }
    }
}

fn resolve_threads(requested: usize) -> usize {
    if requested == 0 {
        num_cpus::get()
    } else {
        requested
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error("Failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

/// Runs the CLI application
pub fn run() -> Result<(), CliError> {
    let config = CliConfig::parse();

    init_logging(&config.log_level);

    tracing::info!("撮合核心启动");
    tracing::debug!("配置: {:?}", config);

    let engine_config = config.engine_config();
    let simulation_config = config.simulation_config();
    engine_config.validate()?;
    simulation_config.validate()?;

    if config.dry_run {
        println!("{}", serde_json::to_string_pretty(&engine_config)?);
        println!("{}", serde_json::to_string_pretty(&simulation_config)?);
        println!("Dry-run 模式 - 不运行压测");
        return Ok(());
    }

    let engine = Arc::new(MatchingEngine::new(engine_config)?);
    let summary = simulation::run(engine, &simulation_config)?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("========================================");
        println!("插入订单:       {}", summary.orders_inserted);
        println!("订单簿满拒绝:   {}", summary.orders_rejected_full);
        println!("撮合调用:       {}", summary.match_attempts);
        println!("成交笔数:       {}", summary.matches);
        println!("耗时:           {:.2} ms", summary.elapsed_ms);
        println!("========================================");
    }

    if config.metrics {
        print!("{}", METRICS.export());
    }

    Ok(())
}

/// 初始化日志系统
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
