//! Recursive range evaluator.
//!
//! There is no syntax tree. The evaluator works directly on a token range:
//!
//! - a single token is a number or a register;
//! - a range wrapped in one outer pair of parentheses is evaluated without
//!   them;
//! - otherwise the range is split at its *dominant operator*, the operator
//!   outside any parentheses that binds loosest, and each side is evaluated
//!   recursively.
//!
//! Among binary operators of equal binding the rightmost one is dominant,
//! which makes `1-2-3` evaluate as `(1-2)-3`. Prefix operators are
//! right-associative and only dominate a range they start, so `--3` is
//! `-(-3)`.

use std::ops::Range;

use nemu_expr_lexer::{lex, Span, Token, TokenKind};

use crate::balance::{check_balance, Balance};
use crate::config::EvalConfig;
use crate::errors::{EvalError, EvalResult};
use crate::operators::{evaluate_binary, evaluate_unary, Operator};
use crate::stack::descend;
use crate::target::DebugTarget;

/// Evaluates debugger expressions under one [`EvalConfig`].
///
/// Holds no per-call state; every call lexes into its own token list, so a
/// single evaluator can serve any number of threads.
#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    pub fn new(config: EvalConfig) -> Self {
        Evaluator { config }
    }

    /// Evaluate one complete expression against `target`.
    #[tracing::instrument(level = "debug", skip(self, target))]
    pub fn evaluate<T: DebugTarget + ?Sized>(&self, text: &str, target: &T) -> EvalResult {
        let tokens = lex(text)?;
        if tokens.is_empty() {
            return Err(EvalError::EmptyExpression);
        }
        let frame = Frame {
            tokens: tokens.as_slice(),
            target,
            config: &self.config,
        };
        frame.eval(0..tokens.len(), 0)
    }
}

/// Borrowed state for one evaluation call.
struct Frame<'a, 'src, T: ?Sized> {
    tokens: &'a [Token<'src>],
    target: &'a T,
    config: &'a EvalConfig,
}

impl<T: DebugTarget + ?Sized> Frame<'_, '_, T> {
    fn eval(&self, range: Range<usize>, depth: usize) -> EvalResult {
        descend(depth, self.config.depth_limit(), || self.eval_range(range, depth))
    }

    fn eval_range(&self, range: Range<usize>, depth: usize) -> EvalResult {
        if range.is_empty() {
            return Err(EvalError::EmptyOperand {
                span: self.gap_at(range.start),
            });
        }
        if range.len() == 1 {
            return self.eval_atom(&self.tokens[range.start]);
        }

        match check_balance(self.tokens, range.clone()) {
            Balance::FullyWrapped => self.eval(range.start + 1..range.end - 1, depth + 1),
            Balance::Malformed => Err(EvalError::Unbalanced {
                span: self.span_of(&range),
            }),
            Balance::NotWrapped => self.eval_split(range, depth),
        }
    }

    /// Evaluate a number or register token.
    fn eval_atom(&self, token: &Token<'_>) -> EvalResult {
        let text = token.lexeme.unwrap_or_default();
        match token.kind {
            TokenKind::Number => parse_number(text, token.span),
            TokenKind::Register => {
                let name = text.strip_prefix('$').unwrap_or(text);
                self.target
                    .register(name)
                    .ok_or_else(|| EvalError::UnknownRegister {
                        name: name.to_string(),
                        span: token.span,
                    })
            }
            TokenKind::LParen | TokenKind::RParen => Err(EvalError::Unbalanced { span: token.span }),
            _ => Err(EvalError::EmptyOperand {
                span: Span::point(token.span.end),
            }),
        }
    }

    /// Split a balanced, unwrapped range at its dominant operator.
    fn eval_split(&self, range: Range<usize>, depth: usize) -> EvalResult {
        let Some((index, op)) = self.dominant_operator(range.clone()) else {
            return Err(EvalError::MissingOperator {
                span: self.span_of(&range),
            });
        };
        let op_span = self.tokens[index].span;
        tracing::trace!(index, ?op, %op_span, "dominant operator");

        match op {
            Operator::Prefix(unary) => {
                // A depth-0 token before a prefix operator is either a binary
                // operator, an earlier prefix, or an operand that would have
                // made this token binary.
                debug_assert_eq!(index, range.start, "prefix operator must open its range");
                let value = self.eval(index + 1..range.end, depth + 1)?;
                evaluate_unary(unary, value, self.target, op_span)
            }
            Operator::Binary(binary) => {
                let lhs = self.eval(range.start..index, depth + 1)?;
                let rhs = self.eval(index + 1..range.end, depth + 1)?;
                evaluate_binary(binary, lhs, rhs, self.config.division_policy(), op_span)
            }
        }
    }

    /// Find the operator to split `range` at.
    ///
    /// Only operators outside parentheses are candidates. The loosest
    /// binary operator wins, rightmost on ties. With no binary operator,
    /// the first prefix operator wins.
    fn dominant_operator(&self, range: Range<usize>) -> Option<(usize, Operator)> {
        let mut depth: usize = 0;
        let mut binary: Option<(usize, Operator)> = None;
        let mut prefix: Option<(usize, Operator)> = None;

        for index in range {
            let token = &self.tokens[index];
            match token.kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => depth = depth.saturating_sub(1),
                _ if depth == 0 => match Operator::from_kind(token.kind) {
                    Some(op @ Operator::Binary(_)) => match binary {
                        Some((best, _)) if token.binding < self.tokens[best].binding => {}
                        _ => binary = Some((index, op)),
                    },
                    Some(op @ Operator::Prefix(_)) => {
                        prefix = prefix.or(Some((index, op)));
                    }
                    None => {}
                },
                _ => {}
            }
        }

        binary.or(prefix)
    }

    /// Span covering every token of a non-empty range.
    fn span_of(&self, range: &Range<usize>) -> Span {
        let first = self.tokens[range.start].span;
        let last = self.tokens[range.end - 1].span;
        first.merge(last)
    }

    /// Point span where an empty operand sits: before the token at `index`,
    /// or after the last token.
    fn gap_at(&self, index: usize) -> Span {
        match self.tokens.get(index) {
            Some(token) => Span::point(token.span.start),
            None => self
                .tokens
                .last()
                .map_or(Span::default(), |token| Span::point(token.span.end)),
        }
    }
}

/// Parse a number literal: hexadecimal with a `0x`/`0X` prefix, decimal
/// otherwise. Values that do not fit in `u32` are rejected.
fn parse_number(text: &str, span: Span) -> EvalResult {
    let (digits, radix) = match text.get(..2) {
        Some("0x" | "0X") if text.len() > 2 => (&text[2..], 16),
        _ => (text, 10),
    };
    u32::from_str_radix(digits, radix).map_err(|_| EvalError::InvalidLiteral {
        text: text.to_string(),
        span,
    })
}

/// Evaluate `text` against `target` with the default configuration.
pub fn evaluate<T: DebugTarget + ?Sized>(text: &str, target: &T) -> EvalResult {
    Evaluator::default().evaluate(text, target)
}

/// Flag-style evaluation: `(value, true)` on success, `(0, false)` on any
/// recoverable failure.
pub fn expr<T: DebugTarget + ?Sized>(text: &str, target: &T) -> (u32, bool) {
    match evaluate(text, target) {
        Ok(value) => (value, true),
        Err(err) => {
            tracing::debug!(%err, "expression failed");
            (0, false)
        }
    }
}
