//! Evaluation errors.
//!
//! Every variant is recoverable: the console prints it and keeps running.
//! The one fatal path, division by zero under
//! [`DivisionByZero::Abort`](crate::DivisionByZero::Abort), never produces
//! a value of this type.

use nemu_expr_lexer::{LexError, Span};

/// Result of evaluating an expression or sub-range.
pub type EvalResult = Result<u32, EvalError>;

#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum EvalError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("empty expression")]
    EmptyExpression,

    #[error("unbalanced parentheses at {span}")]
    Unbalanced { span: Span },

    #[error("missing operand at {span}")]
    EmptyOperand { span: Span },

    #[error("missing operator at {span}")]
    MissingOperator { span: Span },

    #[error("invalid number literal `{text}` at {span}")]
    InvalidLiteral { text: String, span: Span },

    #[error("unknown register `${name}` at {span}")]
    UnknownRegister { name: String, span: Span },

    #[error("cannot read memory at {addr:#010x} (at {span})")]
    BadAddress { addr: u32, span: Span },

    #[error("division by zero at {span}")]
    DivisionByZero { span: Span },

    #[error("expression nests deeper than {limit} levels")]
    TooDeep { limit: usize },
}

impl EvalError {
    /// Location of the error in the expression text, when there is one.
    pub fn span(&self) -> Option<Span> {
        match self {
            EvalError::Lex(err) => Some(err.span()),
            EvalError::Unbalanced { span }
            | EvalError::EmptyOperand { span }
            | EvalError::MissingOperator { span }
            | EvalError::InvalidLiteral { span, .. }
            | EvalError::UnknownRegister { span, .. }
            | EvalError::BadAddress { span, .. }
            | EvalError::DivisionByZero { span } => Some(*span),
            EvalError::EmptyExpression | EvalError::TooDeep { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn messages_name_the_location() {
        let err = EvalError::UnknownRegister {
            name: "foo".to_string(),
            span: Span::new(2, 6),
        };
        assert_eq!(err.to_string(), "unknown register `$foo` at 2..6");

        let err = EvalError::BadAddress {
            addr: 0x8000_0000,
            span: Span::new(0, 11),
        };
        assert_eq!(err.to_string(), "cannot read memory at 0x80000000 (at 0..11)");
    }

    #[test]
    fn lex_errors_pass_through_unchanged() {
        let lex = LexError {
            position: 3,
            remaining: "#".to_string(),
        };
        let err = EvalError::from(lex.clone());
        assert_eq!(err.to_string(), lex.to_string());
        assert_eq!(err.span(), Some(Span::point(3)));
    }

    #[test]
    fn depth_errors_have_no_span() {
        assert_eq!(EvalError::TooDeep { limit: 8 }.span(), None);
        assert_eq!(EvalError::EmptyExpression.span(), None);
    }
}
