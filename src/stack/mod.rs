//! Custom-Stack Evaluation
//!
//! This module evaluates general non-tail recursion over an explicit stack
//! of heap-allocated frames instead of native calls, preventing stack
//! overflow for arbitrarily deep computations. A [`Frame`] describes one
//! pending computation: ordered argument slots (literals, lazy thunks, or
//! nested frames) plus a combinator applied once every slot is resolved.
//! Frames may carry a memoization key; results for memoized frames are
//! cached for the duration of a single [`run_stack_eval`] call.

mod engine;
mod types;

pub use engine::run_stack_eval;
pub use types::{Args, Combinator, EvalError, Frame, Slot, Step, Thunk};
