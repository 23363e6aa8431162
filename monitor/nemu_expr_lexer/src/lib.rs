//! Tokenizer for NEMU debugger expressions.
//!
//! Turns an expression typed at the debug console into a [`TokenList`]:
//!
//! 1. [`tokenize`] scans with the ordered regex table in [`rules`]
//!    (first matching rule wins, whitespace is skipped).
//! 2. [`disambiguate`] rewrites `-` and `*` in prefix position into
//!    [`TokenKind::Neg`] and [`TokenKind::Deref`].
//!
//! [`lex`] runs both steps. The crate has no dependency on the evaluator so
//! other tools (highlighters, completion) can reuse it.

mod lex_error;
pub mod rules;
mod token;
mod tokenizer;
mod unary;

pub use lex_error::LexError;
pub use rules::{rule_set, Rule, RuleAction, RuleError, RuleMatch, RuleSet, EXPR_RULES};
pub use token::{Binding, Span, Token, TokenKind, TokenList};
pub use tokenizer::{tokenize, tokenize_with};
pub use unary::disambiguate;

/// Tokenize `text` and resolve prefix operators.
pub fn lex(text: &str) -> Result<TokenList<'_>, LexError> {
    let mut tokens = tokenize(text)?;
    disambiguate(&mut tokens);
    Ok(tokens)
}
