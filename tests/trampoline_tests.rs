//! Trampoline tests: tail-call chains at depths the native stack could not
//! reach, checked against direct recursion where the native stack allows.

use std::convert::Infallible;
use std::rc::Rc;

use stackless::{run_trampoline, suspend, Bounce};

type Tramp<T> = Bounce<T, Infallible>;

// Accumulator sum 1 + 2 + ... + n, one bounce per step
fn sum_to(n: u64, acc: u64) -> Tramp<u64> {
    if n == 0 {
        Bounce::Done(acc)
    } else {
        suspend(move || Ok(sum_to(n - 1, n + acc)))
    }
}

fn sum_direct(n: u64, acc: u64) -> u64 {
    if n == 0 {
        acc
    } else {
        sum_direct(n - 1, n + acc)
    }
}

fn is_even(n: u64) -> Tramp<bool> {
    if n == 0 {
        Bounce::Done(true)
    } else {
        suspend(move || Ok(is_odd(n - 1)))
    }
}

fn is_odd(n: u64) -> Tramp<bool> {
    if n == 0 {
        Bounce::Done(false)
    } else {
        suspend(move || Ok(is_even(n - 1)))
    }
}

#[test]
fn accumulator_sum_at_depth_10000() {
    assert_eq!(run_trampoline(sum_to(10_000, 0)), Ok(50_005_000));
}

#[test]
fn agrees_with_direct_recursion_at_modest_depth() {
    assert_eq!(sum_direct(100, 0), 5_050);
    assert_eq!(run_trampoline(sum_to(100, 0)), Ok(5_050));
}

#[test]
fn mutual_parity_alternates_correctly() {
    assert_eq!(run_trampoline(is_even(10_000)), Ok(true));
    assert_eq!(run_trampoline(is_even(10_001)), Ok(false));
    assert_eq!(run_trampoline(is_odd(10_001)), Ok(true));
}

#[test]
fn done_input_is_returned_unchanged() {
    let value: Tramp<&'static str> = Bounce::Done("untouched");
    assert_eq!(run_trampoline(value), Ok("untouched"));
}

#[test]
fn opaque_payloads_pass_through_by_identity() {
    // A function value is neither Eq nor inspectable; the same allocation
    // must come back out
    let f: Rc<dyn Fn(u64) -> u64> = Rc::new(|x| x * 2);
    let out = run_trampoline(Bounce::<_, Infallible>::Done(Rc::clone(&f))).unwrap();
    assert!(Rc::ptr_eq(&f, &out));
    assert_eq!(out(21), 42);
}

#[test]
fn thunk_error_propagates_unmodified() {
    #[derive(Debug, PartialEq)]
    struct Boom(u64);

    fn explode_at(n: u64) -> Bounce<u64, Boom> {
        if n == 3 {
            suspend(move || Err(Boom(n)))
        } else {
            suspend(move || Ok(explode_at(n - 1)))
        }
    }

    assert_eq!(run_trampoline(explode_at(10)), Err(Boom(3)));
}

#[test]
fn deep_chains_run_on_a_tiny_thread_stack() {
    // 64 KiB could not hold a 100k-deep native call chain; the trampoline
    // replaces each step instead of nesting
    let handle = std::thread::Builder::new()
        .stack_size(64 * 1024)
        .spawn(|| run_trampoline(sum_to(100_000, 0)))
        .unwrap();
    assert_eq!(handle.join().unwrap(), Ok(5_000_050_000));
}
