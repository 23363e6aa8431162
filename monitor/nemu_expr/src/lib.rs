//! NEMU debugger expression evaluator.
//!
//! Evaluates one expression typed at the debug console, such as
//! `*($esp + 4) == 0x8048000 && $eax != 0`, to a `u32`.
//!
//! # Pipeline
//!
//! 1. `nemu_expr_lexer::lex` tokenizes and marks prefix `-` / `*`.
//! 2. [`Evaluator`] reduces the token range recursively, using
//!    [`check_balance`] to strip outer parentheses and binding levels to
//!    pick the operator to split at.
//! 3. Registers and memory come from a [`DebugTarget`].
//!
//! Every failure is an [`EvalError`] except division by zero under
//! [`DivisionByZero::Abort`], which panics.

mod balance;
mod config;
mod errors;
mod evaluator;
mod operators;
mod stack;
mod target;

pub use balance::{check_balance, Balance};
pub use config::{DivisionByZero, EvalConfig};
pub use errors::{EvalError, EvalResult};
pub use evaluator::{evaluate, expr, Evaluator};
pub use operators::{evaluate_binary, evaluate_unary, BinaryOp, Operator, UnaryOp, DEREF_WIDTH};
pub use target::{DebugTarget, SnapshotTarget};

pub use nemu_expr_lexer::{LexError, Span};

#[cfg(test)]
mod tests;
