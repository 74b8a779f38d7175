//! Tail-Call Trampoline
//!
//! A trampoline flattens a chain of tail calls into an iterative loop: each
//! step produces either a terminal value or another suspended computation,
//! and [`run_trampoline`] unwraps suspensions until a value appears. Every
//! step *replaces* the previous one rather than nesting inside it, so native
//! stack depth stays constant regardless of chain length.
//!
//! Genuinely non-tail recursion cannot be expressed this way; for that, see
//! the explicit frame stack in [`crate::stack`].
//!
//! # Example
//!
//! Mutually recursive parity at a depth that would overflow the native
//! stack:
//!
//! ```
//! use stackless::{run_trampoline, suspend, Bounce};
//!
//! type Parity = Bounce<bool, std::convert::Infallible>;
//!
//! fn is_even(n: u64) -> Parity {
//!     if n == 0 {
//!         Bounce::Done(true)
//!     } else {
//!         suspend(move || Ok(is_odd(n - 1)))
//!     }
//! }
//!
//! fn is_odd(n: u64) -> Parity {
//!     if n == 0 {
//!         Bounce::Done(false)
//!     } else {
//!         suspend(move || Ok(is_even(n - 1)))
//!     }
//! }
//!
//! assert_eq!(run_trampoline(is_even(10_000)), Ok(true));
//! ```

use std::fmt;

use tracing::trace;

/// A zero-argument unit of deferred work: "do this next".
///
/// Wraps a single thunk producing either a terminal value or another
/// suspension. Immutable once created; owned by whoever holds the reference
/// and consumed exactly once when the trampoline unwraps it.
pub struct Suspended<T, E> {
    thunk: Box<dyn FnOnce() -> Result<Bounce<T, E>, E>>,
}

impl<T, E> Suspended<T, E> {
    /// Wrap a thunk as a suspended computation.
    pub fn new<F>(thunk: F) -> Self
    where
        F: FnOnce() -> Result<Bounce<T, E>, E> + 'static,
    {
        Suspended {
            thunk: Box::new(thunk),
        }
    }

    /// Invoke the held thunk, producing the next bounce.
    fn resume(self) -> Result<Bounce<T, E>, E> {
        (self.thunk)()
    }
}

impl<T, E> fmt::Debug for Suspended<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Suspended(..)")
    }
}

/// One step of a trampolined computation.
pub enum Bounce<T, E> {
    /// Terminal value - the trampoline returns this unchanged.
    Done(T),
    /// Deferred tail call - the trampoline unwraps it and keeps going.
    Suspend(Suspended<T, E>),
}

impl<T, E> fmt::Debug for Bounce<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bounce::Done(_) => f.write_str("Bounce::Done(..)"),
            Bounce::Suspend(_) => f.write_str("Bounce::Suspend(..)"),
        }
    }
}

/// Defer a tail call.
///
/// Shorthand for `Bounce::Suspend(Suspended::new(thunk))`, which keeps
/// recursive definitions close to their direct-style originals.
pub fn suspend<T, E, F>(thunk: F) -> Bounce<T, E>
where
    F: FnOnce() -> Result<Bounce<T, E>, E> + 'static,
{
    Bounce::Suspend(Suspended::new(thunk))
}

/// Unwrap suspensions iteratively until a terminal value appears.
///
/// A [`Bounce::Done`] input is returned unchanged, whatever it holds - the
/// trampoline never inspects or copies the payload. Otherwise the held thunk
/// is invoked repeatedly, each result replacing the current value, until a
/// terminal value is reached.
///
/// An `Err` from any thunk propagates immediately and unmodified; there is
/// no retry and no partial result.
pub fn run_trampoline<T, E>(value: Bounce<T, E>) -> Result<T, E> {
    let mut current = value;
    let mut bounces: u64 = 0;

    loop {
        match current {
            Bounce::Done(result) => {
                trace!(target: "stackless::trampoline", bounces, "trampoline landed");
                return Ok(result);
            }
            Bounce::Suspend(suspended) => {
                bounces += 1;
                current = suspended.resume()?;
            }
        }
    }
}
