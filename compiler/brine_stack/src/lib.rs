//! Stack growth for the interpreter's recursive paths.
//!
//! Parsing nested expressions, executing nested statements and calling
//! user functions all recurse on the native stack. Each of those entry
//! points wraps its body in [`ensure_sufficient_stack`], so a deeply
//! recursive Brine program hits the interpreter's configured call-depth
//! limit (a normal runtime error) instead of overflowing the host stack.
//!
//! - **Red zone**: 128KB. Below this much remaining stack, a new segment is allocated.
//! - **Segment size**: 2MB per growth.

/// Remaining stack below which we grow.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, f)
}

/// WASM manages its own stack; call straight through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
