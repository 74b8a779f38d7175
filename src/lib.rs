//! Stackless - Stack-Safe Recursion Library
//!
//! This library evaluates deeply recursive computations - including genuinely
//! non-tail recursion - without exhausting the bounded native call stack. It
//! provides two evaluation strategies sharing one suspension idiom:
//!
//! 1. **Trampoline** (`trampoline` module) - flattens a chain of tail calls
//!    into an iterative loop. Each step yields either a terminal value or
//!    another suspended computation; the loop unwraps suspensions one at a
//!    time, so native stack depth stays constant.
//!
//! 2. **Custom-stack evaluator** (`stack` module) - maintains an explicit
//!    stack of pending frames for general non-tail recursion. A frame holds
//!    argument slots (literals, lazy thunks, or nested frames) and a
//!    combinator applied once every slot is resolved. An optional per-call
//!    memoization key collapses exponential recomputation (naive Fibonacci,
//!    Ackermann) into linear work.
//!
//! Both evaluators are single-threaded and fully synchronous. "Suspension"
//! here is a data-structuring technique, not a concurrency primitive: once
//! started, an evaluation runs to completion or returns the first error.
//!
//! # Example
//!
//! Memoized Fibonacci through the custom-stack evaluator:
//!
//! ```
//! use stackless::{run_stack_eval, Frame, Slot, Step};
//!
//! type Fib = Step<u64, u64, std::convert::Infallible>;
//!
//! fn fib(n: u64) -> Fib {
//!     if n < 2 {
//!         return Step::Done(n);
//!     }
//!     Step::Continue(
//!         Frame::new([
//!             Slot::thunk(move || Ok(fib(n - 1))),
//!             Slot::thunk(move || Ok(fib(n - 2))),
//!         ])
//!         .fold(|args| Ok(Step::Done(args[0] + args[1])))
//!         .memoized(n),
//!     )
//! }
//!
//! assert_eq!(run_stack_eval(fib(50)), Ok(12_586_269_025));
//! ```
//!
//! # Evaluation strategy
//!
//! - **Lazy argument slots**: a thunk runs only when its turn in the strict
//!   left-to-right resolution order is reached, and never at all if an
//!   earlier slot fails.
//! - **Trampolined continuations**: a combinator may return another frame,
//!   which replaces the finished one on the stack instead of nesting.
//! - **Per-invocation memo table**: rebuilt for every top-level call, so
//!   independent evaluations never share state and need no locking.
//! - **Error propagation**: the first error from a thunk or combinator
//!   aborts the whole evaluation; stack and memo table are discarded.

pub mod stack;
pub mod trampoline;

pub use stack::{
    run_stack_eval, Args, Combinator, EvalError, Frame, Slot, Step, Thunk,
};
pub use trampoline::{run_trampoline, suspend, Bounce, Suspended};

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn trampoline_and_stack_evaluator_agree_on_a_countdown() {
        fn bounce(n: u32) -> Bounce<u32, Infallible> {
            if n == 0 {
                Bounce::Done(0)
            } else {
                suspend(move || Ok(bounce(n - 1)))
            }
        }

        fn frames(n: u32) -> Step<u32, (), Infallible> {
            if n == 0 {
                Step::Done(0)
            } else {
                Step::Continue(Frame::new([Slot::thunk(move || Ok(frames(n - 1)))]))
            }
        }

        assert_eq!(run_trampoline(bounce(64)), Ok(0));
        assert_eq!(run_stack_eval(frames(64)), Ok(0));
    }

    #[test]
    fn single_literal_frame_passes_through() {
        let frame: Frame<i64, (), Infallible> = Frame::new([Slot::literal(5)]);
        assert_eq!(run_stack_eval(Step::Continue(frame)), Ok(5));
    }
}
