/// Load Simulation
///
/// Drives the engine the way the production harness does: a pool of
/// producer threads inserting random orders and a pool of matcher threads
/// calling `match_order` on random tickers, all sharing one
/// `Arc<MatchingEngine>`. Matches are forwarded over a crossbeam channel to
/// the calling thread, which reports them.
///
/// The core never depends on this module.

pub mod generator;
pub mod runner;

pub use generator::OrderGenerator;
pub use runner::run;

use crate::shared::error::ConfigError;
use serde::{Deserialize, Serialize};

/// 压测配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// 下单线程数
    pub add_threads: usize,

    /// 每个下单线程提交的订单数
    pub orders_per_thread: usize,

    /// 撮合线程数
    pub match_threads: usize,

    /// 每个撮合线程的撮合调用次数
    pub matches_per_thread: usize,

    /// 随机种子（None 表示每次运行不同）
    pub seed: Option<u64>,

    pub min_quantity: u64,
    pub max_quantity: u64,

    /// 价格区间 `[min_price, max_price)`
    pub min_price: f64,
    pub max_price: f64,

    /// 每笔成交以 info 级别打印
    pub report_matches: bool,

    /// 绑定工作线程到CPU核心（需要 `cpu-affinity` 特性）
    pub cpu_affinity: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            add_threads: 4,
            orders_per_thread: 1000,
            match_threads: 2,
            matches_per_thread: 1000,
            seed: None,
            min_quantity: 1,
            max_quantity: 100,
            min_price: 0.1,
            max_price: 100.0,
            report_matches: true,
            cpu_affinity: false,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.add_threads == 0 {
            return Err(ConfigError::ZeroThreads("add_threads"));
        }
        if self.match_threads == 0 {
            return Err(ConfigError::ZeroThreads("match_threads"));
        }
        if self.min_quantity == 0 || self.min_quantity > self.max_quantity {
            return Err(ConfigError::InvalidRange {
                name: "quantity",
                detail: format!("{}..={}", self.min_quantity, self.max_quantity),
            });
        }
        if !(self.min_price > 0.0 && self.min_price < self.max_price && self.max_price.is_finite()) {
            return Err(ConfigError::InvalidRange {
                name: "price",
                detail: format!("{}..{}", self.min_price, self.max_price),
            });
        }
        Ok(())
    }

    /// 第 `worker` 个线程的随机种子
    pub(crate) fn worker_seed(&self, worker: usize) -> Option<u64> {
        self.seed
            .map(|seed| seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(worker as u64))
    }
}

/// 一次压测的统计结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub orders_inserted: u64,
    pub orders_rejected_full: u64,
    pub orders_rejected_invalid: u64,
    pub match_attempts: u64,
    pub matches: u64,
    pub no_match: u64,
    pub elapsed_ms: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Invalid simulation config: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to spawn worker thread {name}: {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Worker thread {0} panicked")]
    WorkerPanicked(String),
}
