//! Memoization Benchmark Suite
//!
//! Benchmarks the custom-stack evaluator on classic dynamic programming
//! problems:
//! - Fibonacci (exponential → linear with memoization)
//! - Coin change (exponential → pseudo-polynomial with memoization)
//!
//! Run with:
//!   cargo bench --bench memoization
//!
//! Expected results:
//!   - fib(20) with memo should beat fib(20) without by orders of magnitude
//!   - coin change scales to amounts far past what the unmemoized version
//!     could finish

use std::convert::Infallible;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stackless::{run_stack_eval, Frame, Slot, Step};

fn fib_memo(n: i64) -> Step<i64, i64, Infallible> {
    if n < 2 {
        return Step::Done(n);
    }
    Step::Continue(
        Frame::new([
            Slot::thunk(move || Ok(fib_memo(n - 1))),
            Slot::thunk(move || Ok(fib_memo(n - 2))),
        ])
        .fold(|args| Ok(Step::Done(args[0] + args[1])))
        .memoized(n),
    )
}

fn fib_plain(n: i64) -> Step<i64, i64, Infallible> {
    if n < 2 {
        return Step::Done(n);
    }
    Step::Continue(
        Frame::new([
            Slot::thunk(move || Ok(fib_plain(n - 1))),
            Slot::thunk(move || Ok(fib_plain(n - 2))),
        ])
        .fold(|args| Ok(Step::Done(args[0] + args[1]))),
    )
}

const COINS: [i64; 5] = [1, 5, 10, 25, 50];

fn coin_change(amount: i64, index: usize) -> Step<i64, (i64, usize), Infallible> {
    if amount == 0 {
        Step::Done(1)
    } else if amount < 0 || index >= COINS.len() {
        Step::Done(0)
    } else {
        Step::Continue(
            Frame::new([
                Slot::thunk(move || Ok(coin_change(amount, index + 1))),
                Slot::thunk(move || Ok(coin_change(amount - COINS[index], index))),
            ])
            .fold(|args| Ok(Step::Done(args[0] + args[1])))
            .memoized((amount, index)),
        )
    }
}

fn bench_fibonacci(c: &mut Criterion) {
    c.bench_function("fib_20_no_memo", |b| {
        b.iter(|| run_stack_eval(fib_plain(black_box(20))))
    });
    c.bench_function("fib_20_memo", |b| {
        b.iter(|| run_stack_eval(fib_memo(black_box(20))))
    });
    c.bench_function("fib_50_memo", |b| {
        b.iter(|| run_stack_eval(fib_memo(black_box(50))))
    });
}

fn bench_coin_change(c: &mut Criterion) {
    c.bench_function("coin_change_100_memo", |b| {
        b.iter(|| run_stack_eval(coin_change(black_box(100), 0)))
    });
    c.bench_function("coin_change_10000_memo", |b| {
        b.iter(|| run_stack_eval(coin_change(black_box(10_000), 0)))
    });
}

criterion_group!(benches, bench_fibonacci, bench_coin_change);
criterion_main!(benches);
