use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use ticker_matching_core::{EngineConfig, MatchingEngine, OrderType};

/// 买价全部低于卖价，撮合不会成交
fn prefilled_engine(capacity: usize, fill: usize) -> MatchingEngine {
    let engine = MatchingEngine::new(EngineConfig { max_tickers: 1, max_orders_per_side: capacity }).unwrap();
    for i in 0..fill {
        engine.add_order(OrderType::Sell, 0, 10, 50.0 + i as f64 * 0.01).unwrap();
        engine.add_order(OrderType::Buy, 0, 10, 40.0 + (i % 200) as f64 * 0.01).unwrap();
    }
    engine
}

fn add_order_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_order");

    group.bench_function("fill 1024 slots on one side", |b| {
        b.iter_batched(
            || MatchingEngine::new(EngineConfig { max_tickers: 1, max_orders_per_side: 1024 }).unwrap(),
            |engine| {
                for i in 0..1024 {
                    black_box(engine.add_order(OrderType::Buy, 0, 10, 1.0 + i as f64)).unwrap();
                }
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn realistic_match_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Realistic OrderBook Matching");

    let book_size = 1024;

    // 每次调用都完整扫描两侧但不成交
    let engine = prefilled_engine(book_size, book_size);
    group.bench_function("full scan without a match, 1024 orders per side", |b| {
        b.iter(|| black_box(engine.match_order(0)));
    });

    // 每轮重建订单簿，测量一次成交
    group.bench_function("1-to-1 match in a fresh book with 1023 sells", |b| {
        b.iter_batched(
            || {
                let engine = prefilled_engine(book_size, book_size - 1);
                engine.add_order(OrderType::Buy, 0, 10, 100.0).unwrap();
                engine
            },
            |engine| {
                black_box(engine.match_order(0)).unwrap();
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, add_order_benchmark, realistic_match_benchmark);
criterion_main!(benches);
