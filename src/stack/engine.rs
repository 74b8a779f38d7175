//! Custom-Stack Engine - Iterative Evaluation
//!
//! This module contains [`run_stack_eval`], the iterative loop that
//! evaluates [`Frame`] graphs over an explicit stack instead of native
//! recursion. Native stack usage is constant: every iteration pops one
//! frame, does a bounded amount of work, and pushes at most two frames back.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::trace;

use super::types::{EvalError, Frame, SlotState, Step};

/// Evaluate a frame graph to a terminal value over an explicit stack.
///
/// A [`Step::Done`] input is returned unchanged, whatever it holds.
/// Otherwise the evaluator loops over a stack seeded with the input frame:
///
/// - **Collecting**: while a frame has unresolved slots, the front slot is
///   resolved. Thunks are invoked lazily at this point; a resulting frame is
///   either replaced by a cached value (memo hit) or pushed on the stack,
///   suspending the parent until the child delivers its result.
/// - **Resolving**: once every slot is resolved the frame is popped and its
///   combinator applied. A [`Step::Continue`] result replaces the popped
///   frame in place, so continuation chains do not grow the stack. A
///   terminal result is stored under the frame's memo key (if any) and
///   written into the parent's next slot - or returned, if the stack is
///   empty.
///
/// The memo table lives exactly as long as this call; separate invocations
/// never share cached results. Entries are written only for terminal
/// results: a combinator yielding a continuation leaves its own key unused,
/// and the continuation frame carries its own.
///
/// # Errors
///
/// The first `Err` from a thunk or combinator aborts the evaluation as
/// [`EvalError::Host`], payload unmodified; stack and memo table are
/// discarded. A frame with no combinator and arity other than one fails
/// with [`EvalError::MalformedFrame`].
pub fn run_stack_eval<T, K, E>(input: Step<T, K, E>) -> Result<T, EvalError<E>>
where
    T: Clone,
    K: Eq + Hash,
{
    let mut stack: Vec<Frame<T, K, E>> = match input {
        Step::Done(value) => return Ok(value),
        Step::Continue(frame) => vec![frame],
    };

    // Debug tracing controlled by environment variable
    let debug_eval = std::env::var("STACKLESS_DEBUG_EVAL").is_ok();
    let mut step_count: u64 = 0;
    let mut memo_hits: u64 = 0;

    // Memo table scoped to this invocation only
    let mut memo: HashMap<K, T> = HashMap::new();

    while let Some(mut head) = stack.pop() {
        step_count += 1;
        if debug_eval && (step_count < 100 || step_count % 1000 == 0) {
            eprintln!(
                "[EVAL#{}] stack={} resolved={}/{} memo={}",
                step_count,
                stack.len() + 1,
                head.resolved.len(),
                head.arity(),
                memo.len()
            );
        }

        match head.pending.pop_front() {
            // Collecting phase: resolve the next argument slot
            Some(slot) => {
                let step = match slot.state {
                    SlotState::Literal(value) => Step::Done(value),
                    // Lazy: a thunk runs only once its turn in the
                    // left-to-right order is reached
                    SlotState::Thunk(thunk) => thunk().map_err(EvalError::Host)?,
                    SlotState::Frame(frame) => Step::Continue(frame),
                };

                match step {
                    Step::Done(value) => {
                        head.resolved.push(value);
                        stack.push(head);
                    }
                    Step::Continue(child) => {
                        let cached = child.memo_key.as_ref().and_then(|key| memo.get(key));
                        if let Some(value) = cached {
                            // Memo hit: substitute the cached result instead
                            // of re-pushing a duplicate computation
                            memo_hits += 1;
                            trace!(
                                target: "stackless::stack::engine",
                                memo_hits,
                                "memo hit"
                            );
                            head.resolved.push(value.clone());
                            stack.push(head);
                        } else {
                            // Suspend the parent; the child delivers its
                            // result into the parent's next slot on pop
                            trace!(
                                target: "stackless::stack::engine",
                                stack_depth = stack.len() + 2,
                                child = ?child,
                                "push child frame"
                            );
                            stack.push(head);
                            stack.push(child);
                        }
                    }
                }
            }

            // Resolving phase: every slot resolved, apply the combinator
            None => {
                let Frame {
                    combinator,
                    resolved,
                    memo_key,
                    ..
                } = head;

                let result = match combinator {
                    Some(fold) => fold(resolved).map_err(EvalError::Host)?,
                    None => {
                        // Pass-through is only defined for a single argument
                        let arity = resolved.len();
                        let mut values = resolved.into_iter();
                        match (values.next(), values.next()) {
                            (Some(value), None) => Step::Done(value),
                            _ => return Err(EvalError::MalformedFrame { arity }),
                        }
                    }
                };

                match result {
                    // Trampolined continuation: replaces the popped frame,
                    // stack depth does not grow
                    Step::Continue(next) => stack.push(next),
                    Step::Done(value) => {
                        if let Some(key) = memo_key {
                            memo.insert(key, value.clone());
                        }
                        match stack.last_mut() {
                            None => {
                                trace!(
                                    target: "stackless::stack::engine",
                                    steps = step_count,
                                    memo_hits,
                                    memo_entries = memo.len(),
                                    "evaluation complete"
                                );
                                return Ok(value);
                            }
                            Some(parent) => parent.resolved.push(value),
                        }
                    }
                }
            }
        }
    }

    // Every loop path pushes a frame back or returns; the stack can only
    // drain through the return above
    unreachable!("frame stack drained without a terminal result")
}
