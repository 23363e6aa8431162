//! Operator implementations for the evaluator.
//!
//! Operators form a closed set, so dispatch is a `match` on an enum and the
//! compiler checks that every operator the splitter can pick is handled.
//! All arithmetic is on wrapping `u32`, like the registers it reads.

use nemu_expr_lexer::{Span, TokenKind};

use crate::config::DivisionByZero;
use crate::errors::{EvalError, EvalResult};
use crate::target::DebugTarget;

/// Width in bytes of the memory read performed by prefix `*`.
pub const DEREF_WIDTH: u32 = 4;

/// Prefix operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Deref,
}

/// Binary operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    And,
    Or,
}

/// An operator token, split by arity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Prefix(UnaryOp),
    Binary(BinaryOp),
}

impl Operator {
    /// The operator a token stands for, or `None` for literals and parens.
    pub const fn from_kind(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Neg => Operator::Prefix(UnaryOp::Neg),
            TokenKind::Deref => Operator::Prefix(UnaryOp::Deref),
            TokenKind::Plus => Operator::Binary(BinaryOp::Add),
            TokenKind::Minus => Operator::Binary(BinaryOp::Sub),
            TokenKind::Star => Operator::Binary(BinaryOp::Mul),
            TokenKind::Slash => Operator::Binary(BinaryOp::Div),
            TokenKind::EqEq => Operator::Binary(BinaryOp::Eq),
            TokenKind::NotEq => Operator::Binary(BinaryOp::NotEq),
            TokenKind::AndAnd => Operator::Binary(BinaryOp::And),
            TokenKind::OrOr => Operator::Binary(BinaryOp::Or),
            TokenKind::Number | TokenKind::Register | TokenKind::LParen | TokenKind::RParen => {
                return None
            }
        })
    }
}

/// Apply a prefix operator to an already evaluated operand.
///
/// `span` is the operator's own span, used for memory errors.
pub fn evaluate_unary<T: DebugTarget + ?Sized>(
    op: UnaryOp,
    value: u32,
    target: &T,
    span: Span,
) -> EvalResult {
    match op {
        UnaryOp::Neg => Ok(value.wrapping_neg()),
        UnaryOp::Deref => target
            .read_memory(value, DEREF_WIDTH)
            .ok_or(EvalError::BadAddress { addr: value, span }),
    }
}

/// Combine two evaluated operands.
///
/// Both operands are evaluated before this is called, so `&&` and `||`
/// never short-circuit.
pub fn evaluate_binary(
    op: BinaryOp,
    lhs: u32,
    rhs: u32,
    policy: DivisionByZero,
    span: Span,
) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(lhs.wrapping_add(rhs)),
        BinaryOp::Sub => Ok(lhs.wrapping_sub(rhs)),
        BinaryOp::Mul => Ok(lhs.wrapping_mul(rhs)),
        BinaryOp::Div => match lhs.checked_div(rhs) {
            Some(quotient) => Ok(quotient),
            None => Err(division_by_zero(policy, span)),
        },
        BinaryOp::Eq => Ok(u32::from(lhs == rhs)),
        BinaryOp::NotEq => Ok(u32::from(lhs != rhs)),
        BinaryOp::And => Ok(u32::from(lhs != 0 && rhs != 0)),
        BinaryOp::Or => Ok(u32::from(lhs != 0 || rhs != 0)),
    }
}

#[cold]
fn division_by_zero(policy: DivisionByZero, span: Span) -> EvalError {
    match policy {
        DivisionByZero::Fail => EvalError::DivisionByZero { span },
        DivisionByZero::Abort => {
            tracing::error!(%span, "division by zero");
            panic!("division by zero at {span}");
        }
    }
}
