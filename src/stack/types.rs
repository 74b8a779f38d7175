//! Frame Types for Custom-Stack Evaluation
//!
//! These types describe pending non-tail computations for the iterative
//! evaluator in [`super::engine`]. All of them are generic over the terminal
//! value type `T`, the memoization key type `K`, and the host error type
//! `E`.

use std::collections::VecDeque;
use std::fmt;

use smallvec::SmallVec;

/// Resolved argument values handed to a [`Combinator`].
///
/// Frames overwhelmingly have one or two arguments, so values are stored
/// inline and only spill to the heap for wider frames.
pub type Args<T> = SmallVec<[T; 2]>;

/// A deferred argument: invoked lazily, only once its slot's turn in the
/// left-to-right resolution order is reached.
pub type Thunk<T, K, E> = Box<dyn FnOnce() -> Result<Step<T, K, E>, E>>;

/// Function applied to a frame's fully resolved argument list, producing
/// either a terminal value or another frame (a continuation).
pub type Combinator<T, K, E> = Box<dyn FnOnce(Args<T>) -> Result<Step<T, K, E>, E>>;

/// Result of one unit of work: finished, or more work to evaluate.
///
/// `Continue` returned from a combinator is a *trampolined continuation*:
/// the new frame replaces the finished one on the evaluator stack, so chains
/// of continuations (Ackermann's nested self-application, for instance) do
/// not grow the stack.
pub enum Step<T, K, E> {
    /// Terminal value.
    Done(T),
    /// A frame still to be evaluated.
    Continue(Frame<T, K, E>),
}

impl<T, K, E> fmt::Debug for Step<T, K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Done(_) => f.write_str("Step::Done(..)"),
            Step::Continue(frame) => f.debug_tuple("Step::Continue").field(frame).finish(),
        }
    }
}

/// One argument slot of a [`Frame`].
///
/// The concrete state (literal, thunk, or nested frame) is private; the
/// evaluator owns the slot lifecycle and resolves each slot exactly once.
pub struct Slot<T, K, E> {
    pub(crate) state: SlotState<T, K, E>,
}

pub(crate) enum SlotState<T, K, E> {
    Literal(T),
    Thunk(Thunk<T, K, E>),
    Frame(Frame<T, K, E>),
}

impl<T, K, E> Slot<T, K, E> {
    /// An already-resolved value.
    pub fn literal(value: T) -> Self {
        Slot {
            state: SlotState::Literal(value),
        }
    }

    /// A deferred computation, invoked only when this slot's turn comes.
    pub fn thunk<F>(thunk: F) -> Self
    where
        F: FnOnce() -> Result<Step<T, K, E>, E> + 'static,
    {
        Slot {
            state: SlotState::Thunk(Box::new(thunk)),
        }
    }

    /// A nested frame, pushed onto the evaluator stack when reached.
    pub fn frame(frame: Frame<T, K, E>) -> Self {
        Slot {
            state: SlotState::Frame(frame),
        }
    }
}

impl<T, K, E> fmt::Debug for Slot<T, K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state {
            SlotState::Literal(_) => f.write_str("Slot::Literal(..)"),
            SlotState::Thunk(_) => f.write_str("Slot::Thunk(..)"),
            SlotState::Frame(_) => f.write_str("Slot::Frame(..)"),
        }
    }
}

/// A pending non-tail computation.
///
/// A frame holds ordered argument slots, the values resolved so far, an
/// optional combinator, and an optional memoization key. The evaluator
/// resolves slots strictly left to right; once every slot is resolved, the
/// combinator is applied to the collected values. Without a combinator the
/// frame passes its single argument through unchanged - a no-combinator
/// frame whose arity is not exactly one is rejected as
/// [`EvalError::MalformedFrame`].
///
/// Frames are built with [`Frame::new`] and the [`Frame::fold`] /
/// [`Frame::memoized`] builder methods, or created by a combinator returning
/// [`Step::Continue`] as a continuation.
pub struct Frame<T, K, E> {
    /// Applied to the resolved arguments; `None` means pass-through.
    pub(crate) combinator: Option<Combinator<T, K, E>>,
    /// Slots not yet resolved, in argument order.
    pub(crate) pending: VecDeque<Slot<T, K, E>>,
    /// Values resolved so far, left to right.
    pub(crate) resolved: Args<T>,
    /// Caller-chosen key identifying this computation instance.
    pub(crate) memo_key: Option<K>,
}

impl<T, K, E> Frame<T, K, E> {
    /// Create a frame from its argument slots, with no combinator and no
    /// memoization key.
    pub fn new<I>(args: I) -> Self
    where
        I: IntoIterator<Item = Slot<T, K, E>>,
    {
        Frame {
            combinator: None,
            pending: args.into_iter().collect(),
            resolved: Args::new(),
            memo_key: None,
        }
    }

    /// Set the combinator applied once every argument slot is resolved.
    ///
    /// The combinator may return [`Step::Continue`] to keep working: the new
    /// frame replaces this one on the evaluator stack.
    pub fn fold<F>(mut self, combinator: F) -> Self
    where
        F: FnOnce(Args<T>) -> Result<Step<T, K, E>, E> + 'static,
    {
        self.combinator = Some(Box::new(combinator));
        self
    }

    /// Attach a memoization key.
    ///
    /// Within one [`super::run_stack_eval`] call, the first terminal result
    /// produced under `key` is cached; later frames carrying an equal key
    /// are replaced by the cached value instead of being evaluated.
    pub fn memoized(mut self, key: K) -> Self {
        self.memo_key = Some(key);
        self
    }

    /// Total number of argument slots, resolved or not.
    pub fn arity(&self) -> usize {
        self.pending.len() + self.resolved.len()
    }
}

impl<T, K, E> fmt::Debug for Frame<T, K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("arity", &self.arity())
            .field("resolved", &self.resolved.len())
            .field("combinator", &self.combinator.is_some())
            .field("memoized", &self.memo_key.is_some())
            .finish()
    }
}

/// Error returned by [`super::run_stack_eval`].
#[derive(Debug, PartialEq, Eq)]
pub enum EvalError<E> {
    /// Error raised by a thunk or combinator, propagated with its payload
    /// unmodified. The first host error aborts the whole evaluation.
    Host(E),

    /// A frame with no combinator resolved all of its slots but does not
    /// have exactly one argument, so there is nothing well-defined to pass
    /// through.
    MalformedFrame {
        /// Number of argument slots the offending frame had.
        arity: usize,
    },
}

impl<E: fmt::Display> fmt::Display for EvalError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Host(err) => write!(f, "{}", err),
            EvalError::MalformedFrame { arity } => write!(
                f,
                "frame with {} argument slots has no combinator; pass-through requires exactly one",
                arity
            ),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for EvalError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EvalError::Host(err) => Some(err),
            EvalError::MalformedFrame { .. } => None,
        }
    }
}
