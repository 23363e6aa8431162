//! Lexer error type.

use crate::token::Span;

/// No rule matched at some position of the expression.
///
/// Recoverable: the console reports it and waits for the next command.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("no match at position {position}: {remaining}")]
pub struct LexError {
    /// Byte offset where the scan got stuck.
    pub position: usize,
    /// Unconsumed text starting at `position`.
    pub remaining: String,
}

impl LexError {
    pub(crate) fn stuck_at(text: &str, position: usize) -> Self {
        LexError {
            position,
            remaining: text.get(position..).unwrap_or_default().to_string(),
        }
    }

    /// Point span at the offending position.
    pub fn span(&self) -> Span {
        Span::point(u32::try_from(self.position).unwrap_or(u32::MAX))
    }

    /// Two-line rendering: the expression, then a caret under the column
    /// where lexing stopped.
    ///
    /// ```text
    /// 1 + @2
    ///     ^
    /// ```
    pub fn caret_line(&self, source: &str) -> String {
        let column = source
            .get(..self.position)
            .map_or(self.position, |prefix| prefix.chars().count());
        format!("{source}\n{:column$}^", "")
    }
}
