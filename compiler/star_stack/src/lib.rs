//! Stack growth for recursive passes.
//!
//! The parser and the compiler both recurse once per nesting level of a
//! template expression. Templates are host input, so a pathological
//! `((((...))))` must not take the process down. Wrap each recursive entry
//! point in [`ensure_sufficient_stack`].
//!
//! On native targets this grows the stack through `stacker`; on `wasm32` it
//! is a passthrough.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if fewer than `RED_ZONE` bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
