//! Prefix-operator recognition.
//!
//! `-` and `*` are ambiguous after tokenizing. A single forward pass turns
//! them into `Neg` / `Deref` when they cannot be binary: at the start of
//! the expression, or after a token that cannot end an operand.

use crate::token::{TokenKind, TokenList};

/// Whether a token of kind `prev` leaves the parser expecting an operand.
#[inline]
fn expects_operand(prev: TokenKind) -> bool {
    matches!(
        prev,
        TokenKind::LParen
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Neg
            | TokenKind::Deref
    )
}

/// Reclassify prefix `-` and `*` in place.
///
/// Each decision looks only at the already-processed previous token, so a
/// run like `--*x` becomes `Neg Neg Deref x`.
pub fn disambiguate(tokens: &mut TokenList<'_>) {
    for i in 0..tokens.len() {
        let prefix_position = i == 0 || expects_operand(tokens[i - 1].kind);
        if !prefix_position {
            continue;
        }
        match tokens[i].kind {
            TokenKind::Star => tokens[i].reclassify(TokenKind::Deref),
            TokenKind::Minus => tokens[i].reclassify(TokenKind::Neg),
            _ => {}
        }
    }
    tracing::debug!(?tokens, "disambiguated");
}
