//! Stack safety for deep expansions.
//!
//! Expansion depth tracks grammar nesting, and right-recursive lists make it
//! proportional to input length, so a long program can push past a default
//! thread stack. Recursive entry points wrap themselves in
//! [`ensure_sufficient_stack`], which grows the stack on demand on native
//! targets and is a no-op passthrough on WASM (which manages its own stack).

/// Minimum stack space to keep available (100KB red zone).
///
/// If less than this amount remains, the stack is grown before recursing.
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
