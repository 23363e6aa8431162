//! Parenthesis balance over a token range.

use std::ops::Range;

use nemu_expr_lexer::{Token, TokenKind};

/// Shape of a token range with respect to parentheses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Balance {
    /// Empty or inverted range, a `)` without a matching `(`, or an
    /// unclosed `(`.
    Malformed,
    /// Balanced, and the first `(` closes exactly at the last token.
    FullyWrapped,
    /// Balanced but not framed by one outer pair, e.g. `1+2` or `(1)+(2)`.
    NotWrapped,
}

/// Classify `tokens[range]` in a single left-to-right scan.
///
/// The depth counter proves balance; noting whether the depth returns to
/// zero before the last token tells `(1)+(2)` apart from `((1)+(2))`.
pub fn check_balance(tokens: &[Token<'_>], range: Range<usize>) -> Balance {
    let Some(slice) = tokens.get(range) else {
        return Balance::Malformed;
    };
    let Some(last) = slice.len().checked_sub(1) else {
        return Balance::Malformed;
    };

    let mut depth: usize = 0;
    let mut closed_early = false;
    for (i, token) in slice.iter().enumerate() {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => {
                let Some(outer) = depth.checked_sub(1) else {
                    return Balance::Malformed;
                };
                depth = outer;
                if depth == 0 && i != last {
                    closed_early = true;
                }
            }
            _ => {}
        }
    }

    if depth != 0 {
        Balance::Malformed
    } else if slice[0].kind == TokenKind::LParen
        && slice[last].kind == TokenKind::RParen
        && !closed_early
    {
        Balance::FullyWrapped
    } else {
        Balance::NotWrapped
    }
}
