// 全局内存分配器：使用 jemalloc
#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

// 所有模块声明为公共的，二进制文件、测试和基准测试都能访问
pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod shared;

pub use engine::{EngineConfig, MatchingEngine, MAX_ORDERS_PER_SIDE, MAX_TICKERS};
pub use shared::error::{ConfigError, EngineError};
pub use shared::protocol::{MatchOutcome, MatchReport, NewOrderRequest, NoMatchReason, OrderType, TickerId};
