//! Prometheus Metrics Module
//!
//! 压测工具在调用撮合核心时记录的性能指标。核心本身不写指标。
//!
//! ## 指标类型
//! - **Counter**: 下单结果、撮合结果
//! - **Histogram**: 单次撮合调用延迟
//!
//! ## 使用示例
//! ```rust,ignore
//! use ticker_matching_core::shared::metrics::METRICS;
//!
//! METRICS.orders_total.with_label_values(&["buy", "inserted"]).inc();
//! println!("{}", METRICS.export());
//! ```

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};

lazy_static! {
    /// 全局Metrics实例
    pub static ref METRICS: Metrics = Metrics::new();
}

/// 撮合核心指标
pub struct Metrics {
    /// 下单总数 (按方向和结果: inserted / order_book_full / invalid_ticker ...)
    pub orders_total: CounterVec,

    /// 撮合调用总数 (按结果: matched / no_active_sell / no_eligible_buy / invalid_ticker)
    pub match_attempts_total: CounterVec,

    /// 撮合调用延迟分布 (微秒)
    pub matching_duration: HistogramVec,
}

impl Metrics {
    /// 创建新的Metrics实例
    ///
    /// 重复注册同名指标会失败；全局实例只创建一次。
    pub fn new() -> Self {
        Self {
            orders_total: register_counter_vec!(
                "ticker_matching_orders_total",
                "Total number of add_order calls",
                &["side", "outcome"]
            )
            .expect("metric can be registered"),

            match_attempts_total: register_counter_vec!(
                "ticker_matching_match_attempts_total",
                "Total number of match_order calls",
                &["outcome"]
            )
            .expect("metric can be registered"),

            matching_duration: register_histogram_vec!(
                "ticker_matching_matching_duration_microseconds",
                "match_order call duration in microseconds",
                &["outcome"],
                vec![0.5, 1.0, 5.0, 10.0, 50.0, 100.0, 500.0, 1000.0]
            )
            .expect("metric can be registered"),
        }
    }

    /// 导出Prometheus文本格式的指标
    pub fn export(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = prometheus::gather();
        let mut buffer = vec![];
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::warn!("failed to encode metrics: {}", e);
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_global() {
        // 使用全局METRICS实例而不是创建新的
        METRICS.orders_total.with_label_values(&["buy", "inserted"]).inc();

        let output = METRICS.export();
        assert!(output.contains("ticker_matching_orders_total"));
    }

    #[test]
    fn test_histogram_global() {
        METRICS
            .matching_duration
            .with_label_values(&["matched"])
            .observe(3.5);

        let output = METRICS.export();
        assert!(output.contains("ticker_matching_matching_duration_microseconds"));
    }
}
