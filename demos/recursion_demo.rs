//! Print-based demo driver for both evaluators.
//!
//! Walks the classic examples: trampolined accumulator sums and mutual
//! parity, then memoized Fibonacci, coin change, and Ackermann on the
//! custom stack.
//!
//! Run with:
//!   cargo run --example recursion_demo
//!   RUST_LOG=stackless=trace cargo run --example recursion_demo

use std::convert::Infallible;

use stackless::{run_stack_eval, run_trampoline, suspend, Bounce, Frame, Slot, Step};

fn sum_to(n: u64, acc: u64) -> Bounce<u64, Infallible> {
    if n == 0 {
        Bounce::Done(acc)
    } else {
        suspend(move || Ok(sum_to(n - 1, n + acc)))
    }
}

fn is_even(n: u64) -> Bounce<bool, Infallible> {
    if n == 0 {
        Bounce::Done(true)
    } else {
        suspend(move || Ok(is_odd(n - 1)))
    }
}

fn is_odd(n: u64) -> Bounce<bool, Infallible> {
    if n == 0 {
        Bounce::Done(false)
    } else {
        suspend(move || Ok(is_even(n - 1)))
    }
}

fn fib(n: i64) -> Step<i64, i64, Infallible> {
    if n < 2 {
        return Step::Done(n);
    }
    Step::Continue(
        Frame::new([
            Slot::thunk(move || Ok(fib(n - 1))),
            Slot::thunk(move || Ok(fib(n - 2))),
        ])
        .fold(|args| Ok(Step::Done(args[0] + args[1])))
        .memoized(n),
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

fn ackermann(m: u64, n: u64) -> Step<u64, (u64, u64), Infallible> {
    if m == 0 {
        Step::Done(n + 1)
    } else if n == 0 {
        Step::Continue(
            Frame::new([Slot::thunk(move || Ok(ackermann(m - 1, 1)))]).memoized((m, n)),
        )
    } else {
        Step::Continue(
            Frame::new([
                Slot::literal(m - 1),
                Slot::thunk(move || Ok(ackermann(m, n - 1))),
            ])
            .fold(|args| {
                let (outer, inner) = (args[0], args[1]);
                Ok(Step::Continue(
                    Frame::new([Slot::thunk(move || Ok(ackermann(outer, inner)))])
                        .memoized((outer, inner)),
                ))
            })
            .memoized((m, n)),
        )
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("trampoline ------------------------------------------------------");
    println!("sum_to(10000, 0)   = {}", run_trampoline(sum_to(10_000, 0))?);
    println!("is_even(10000)     = {}", run_trampoline(is_even(10_000))?);
    println!("is_even(10001)     = {}", run_trampoline(is_even(10_001))?);

    println!("custom stack ----------------------------------------------------");
    println!("fib(50)            = {}", run_stack_eval(fib(50))?);
    println!("coin_change(100)   = {}", run_stack_eval(coin_change(100, 0))?);
    println!("coin_change(10000) = {}", run_stack_eval(coin_change(10_000, 0))?);
    println!(
        "coin_change(100000) = {}",
        run_stack_eval(coin_change(100_000, 0))?
    );
    println!("ackermann(3, 5)    = {}", run_stack_eval(ackermann(3, 5))?);
    println!("ackermann(4, 1)    = {}", run_stack_eval(ackermann(4, 1))?);
    println!("ackermann(3, 14)   = {}", run_stack_eval(ackermann(3, 14))?);

    Ok(())
}
