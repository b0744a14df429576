//! Stack growth for deep recursion.
//!
//! Each nesting level of the grammar costs several recursive frames. The
//! depth limit bounds how many levels there are; this makes sure the stack
//! they need exists, even on a small thread stack such as a test thread's
//! or a rayon worker's.

/// Grow when less than this remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first moving to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
