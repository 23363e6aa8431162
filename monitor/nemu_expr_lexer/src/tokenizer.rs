//! Rule-table tokenizer.
//!
//! Scans left to right. At each position the first matching rule consumes
//! its text and, unless it is a skip rule, emits one token. The scan either
//! consumes the whole input or stops at the first position no rule matches.

use crate::lex_error::LexError;
use crate::rules::{rule_set, RuleAction, RuleSet};
use crate::token::{Span, Token, TokenList};

/// Tokenize `text` with the expression grammar.
///
/// Emits plain `Minus` and `Star` for every `-` and `*`; see
/// [`disambiguate`](crate::disambiguate) for the prefix forms.
pub fn tokenize(text: &str) -> Result<TokenList<'_>, LexError> {
    tokenize_with(rule_set(), text)
}

/// Tokenize `text` against an arbitrary rule table.
pub fn tokenize_with<'src>(rules: &RuleSet, text: &'src str) -> Result<TokenList<'src>, LexError> {
    let mut tokens = TokenList::new();
    let mut pos = 0;

    while pos < text.len() {
        let Some(m) = rules.match_at(text, pos) else {
            tracing::debug!(position = pos, "no rule matches");
            return Err(LexError::stuck_at(text, pos));
        };

        let end = pos + m.len;
        let lexeme = &text[pos..end];
        tracing::trace!(
            rule = m.index,
            pattern = m.rule.pattern,
            position = pos,
            len = m.len,
            lexeme,
            "match rules[{}] = {}",
            m.index,
            m.rule.name
        );

        if let RuleAction::Emit(kind) = m.rule.action {
            tokens.push(Token::new(kind, lexeme, Span::from_range(pos..end)));
        }
        pos = end;
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests;
