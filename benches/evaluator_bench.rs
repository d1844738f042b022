use std::str::FromStr;

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use spot_arb_monitor::adapters::types::{Quote, SourceId};
use spot_arb_monitor::core::evaluator::{leg_profit, ArbitrageEvaluator, ArbitrageResult, Direction};
use spot_arb_monitor::core::series::{Observation, SeriesRecorder};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn make_quote(source: &str, bid: &str, ask: &str) -> Quote {
    Quote::new(SourceId::from(source), dec(bid), dec(ask), Utc::now())
}

fn bench_evaluate(c: &mut Criterion) {
    c.bench_function("evaluate_pair", |b| {
        let quote_a = make_quote("binance:BTCUSDT", "64000.10", "64000.20");
        let quote_b = make_quote("coinbase:BTC-USD", "64050.55", "64051.00");
        let evaluator = ArbitrageEvaluator::new(dec("0.001")).unwrap();

        b.iter(|| {
            black_box(evaluator.evaluate(black_box(&quote_a), black_box(&quote_b)).unwrap());
        });
    });
}

fn bench_leg_profit(c: &mut Criterion) {
    c.bench_function("leg_profit", |b| {
        let buy = make_quote("a", "100", "101");
        let sell = make_quote("b", "102.9", "103");
        let fee = dec("0.001");

        b.iter(|| {
            black_box(leg_profit(black_box(&buy), black_box(&sell), black_box(fee)).unwrap());
        });
    });
}

fn bench_summarize_10k(c: &mut Criterion) {
    c.bench_function("summarize_10k", |b| {
        let mut recorder = SeriesRecorder::new();
        for i in 0..10_000u32 {
            let result = ArbitrageResult {
                profit_absolute: Decimal::from(i % 7),
                profit_percent: Decimal::new(i64::from(i % 50) - 25, 2),
                direction: Direction::AToB,
                buy_source: SourceId::from("a"),
                sell_source: SourceId::from("b"),
            };
            recorder.append(Observation::new(
                Utc::now(),
                make_quote("a", "100", "101"),
                make_quote("b", "102", "103"),
                result,
            ));
        }

        b.iter(|| {
            black_box(recorder.summarize());
        });
    });
}

criterion_group!(benches, bench_evaluate, bench_leg_profit, bench_summarize_10k);
criterion_main!(benches);
