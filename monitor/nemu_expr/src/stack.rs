//! Recursion guard for the evaluator.
//!
//! Each nesting level of an expression is one recursive call. Deeply
//! parenthesized input such as `((((...))))` would otherwise overflow the
//! native stack, so every descent checks the configured depth cap and then
//! lets `stacker` grow the stack on demand.

use crate::errors::{EvalError, EvalResult};

/// Keep at least this much stack free before recursing (64KB).
const RED_ZONE: usize = 64 * 1024;

/// Size of each freshly allocated stack segment (1MB).
const STACK_SEGMENT: usize = 1024 * 1024;

/// Run `f` one nesting level below `depth`.
///
/// Fails with [`EvalError::TooDeep`] instead of calling `f` when `depth`
/// has reached `limit`.
#[inline]
pub(crate) fn descend(depth: usize, limit: Option<usize>, f: impl FnOnce() -> EvalResult) -> EvalResult {
    if let Some(limit) = limit {
        if depth >= limit {
            return Err(EvalError::TooDeep { limit });
        }
    }
    stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, f)
}
