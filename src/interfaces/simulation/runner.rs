//! 压测运行器：下单线程池 + 撮合线程池 + 成交回报汇总

use super::{OrderGenerator, SimulationConfig, SimulationError, SimulationSummary};
use crate::engine::MatchingEngine;
use crate::shared::error::EngineError;
use crate::shared::metrics::METRICS;
use crate::shared::protocol::{MatchOutcome, MatchReport, NoMatchReason};
use crossbeam::channel::{unbounded, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

/// 单个工作线程的计数
#[derive(Debug, Default)]
struct WorkerStats {
    inserted: u64,
    rejected_full: u64,
    rejected_invalid: u64,
    match_attempts: u64,
    no_match: u64,
}

impl WorkerStats {
    fn merge_into(&self, summary: &mut SimulationSummary) {
        summary.orders_inserted += self.inserted;
        summary.orders_rejected_full += self.rejected_full;
        summary.orders_rejected_invalid += self.rejected_invalid;
        summary.match_attempts += self.match_attempts;
        summary.no_match += self.no_match;
    }
}

/// 运行一次压测，等待全部线程结束后返回统计
pub fn run(engine: Arc<MatchingEngine>, config: &SimulationConfig) -> Result<SimulationSummary, SimulationError> {
    config.validate()?;

    let start = Instant::now();
    let (report_tx, report_rx) = unbounded::<MatchReport>();
    let mut handles = Vec::with_capacity(config.add_threads + config.match_threads);

    for worker in 0..config.add_threads {
        let engine = engine.clone();
        let config = config.clone();
        let name = format!("producer-{}", worker);
        let handle = spawn_worker(&name, worker, config.cpu_affinity, move || {
            run_producer(&engine, &config, worker)
        })?;
        handles.push((name, handle));
    }

    for matcher in 0..config.match_threads {
        let worker = config.add_threads + matcher;
        let engine = engine.clone();
        let config = config.clone();
        let report_tx = report_tx.clone();
        let name = format!("matcher-{}", matcher);
        let handle = spawn_worker(&name, worker, config.cpu_affinity, move || {
            run_matcher(&engine, &config, worker, report_tx)
        })?;
        handles.push((name, handle));
    }

    // 所有撮合线程退出后通道关闭，循环结束
    drop(report_tx);
    let mut summary = SimulationSummary::default();
    for report in report_rx.iter() {
        summary.matches += 1;
        if config.report_matches {
            tracing::info!(
                "Matched Ticker {}: Buy at {:.2} with Sell at {:.2} (Quantity: {})",
                report.ticker,
                report.buy_price,
                report.sell_price,
                report.quantity
            );
        } else {
            tracing::debug!(?report, "matched");
        }
    }

    for (name, handle) in handles {
        let stats = handle.join().map_err(|_| SimulationError::WorkerPanicked(name))?;
        stats.merge_into(&mut summary);
    }

    summary.elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    tracing::info!(
        inserted = summary.orders_inserted,
        rejected_full = summary.orders_rejected_full,
        matches = summary.matches,
        elapsed_ms = summary.elapsed_ms,
        "simulation finished"
    );
    Ok(summary)
}

fn spawn_worker<F>(
    name: &str,
    worker: usize,
    cpu_affinity: bool,
    body: F,
) -> Result<thread::JoinHandle<WorkerStats>, SimulationError>
where
    F: FnOnce() -> WorkerStats + Send + 'static,
{
    thread::Builder::new()
        .name(name.to_string())
        .spawn(move || {
            if cpu_affinity {
                pin_to_core(worker);
            }
            body()
        })
        .map_err(|source| SimulationError::Spawn {
            name: name.to_string(),
            source,
        })
}

#[cfg(feature = "cpu-affinity")]
fn pin_to_core(worker: usize) {
    if let Some(core_ids) = core_affinity::get_core_ids() {
        if !core_ids.is_empty() {
            core_affinity::set_for_current(core_ids[worker % core_ids.len()]);
        }
    }
}

#[cfg(not(feature = "cpu-affinity"))]
fn pin_to_core(worker: usize) {
    tracing::debug!(worker, "cpu affinity requested but the cpu-affinity feature is disabled");
}

fn new_generator(engine: &MatchingEngine, config: &SimulationConfig, worker: usize) -> OrderGenerator {
    OrderGenerator::new(
        config.worker_seed(worker),
        engine.config().max_tickers,
        config.min_quantity..=config.max_quantity,
        config.min_price..config.max_price,
    )
}

fn run_producer(engine: &MatchingEngine, config: &SimulationConfig, worker: usize) -> WorkerStats {
    let mut generator = new_generator(engine, config, worker);
    let mut stats = WorkerStats::default();

    for _ in 0..config.orders_per_thread {
        let request = generator.order();
        let side = request.order_type.as_str();
        match engine.submit(&request) {
            Ok(_) => {
                stats.inserted += 1;
                METRICS.orders_total.with_label_values(&[side, "inserted"]).inc();
            }
            Err(e) => {
                if matches!(e, EngineError::OrderBookFull { .. }) {
                    stats.rejected_full += 1;
                } else {
                    stats.rejected_invalid += 1;
                }
                tracing::debug!(worker, "order rejected: {}", e);
                METRICS.orders_total.with_label_values(&[side, e.label()]).inc();
            }
        }
    }

    stats
}

fn run_matcher(
    engine: &MatchingEngine,
    config: &SimulationConfig,
    worker: usize,
    report_tx: Sender<MatchReport>,
) -> WorkerStats {
    let mut generator = new_generator(engine, config, worker);
    let mut stats = WorkerStats::default();

    for _ in 0..config.matches_per_thread {
        let ticker = generator.ticker();
        stats.match_attempts += 1;

        let start = Instant::now();
        let outcome = engine.match_order(ticker);
        let micros = start.elapsed().as_secs_f64() * 1_000_000.0;

        let label = match outcome {
            Ok(MatchOutcome::Matched(report)) => {
                // 接收端只在所有发送端退出后才停止，发送不会失败
                let _ = report_tx.send(report);
                "matched"
            }
            Ok(MatchOutcome::NoMatch(reason)) => {
                stats.no_match += 1;
                match reason {
                    NoMatchReason::NoActiveSell => "no_active_sell",
                    NoMatchReason::NoEligibleBuy => "no_eligible_buy",
                }
            }
            Err(e) => {
                stats.no_match += 1;
                tracing::debug!(worker, "match rejected: {}", e);
                e.label()
            }
        };

        METRICS.match_attempts_total.with_label_values(&[label]).inc();
        METRICS.matching_duration.with_label_values(&[label]).observe(micros);
    }

    stats
}
