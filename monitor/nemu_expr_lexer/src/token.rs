//! Token types for debugger expressions.
//!
//! A [`TokenList`] is produced fresh for every evaluation call and borrows
//! literal text straight from the expression string, so nothing here
//! outlives the call that created it.

use smallvec::SmallVec;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Byte range of a token in the expression text.
///
/// Layout: 8 bytes, `start` inclusive, `end` exclusive.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Create from a byte range, saturating offsets that do not fit in `u32`.
    ///
    /// Debugger expressions are a single console line, so saturation only
    /// affects diagnostics for absurd inputs and never the evaluated value.
    #[inline]
    pub fn from_range(range: std::ops::Range<usize>) -> Self {
        let start = u32::try_from(range.start).unwrap_or(u32::MAX);
        let end = u32::try_from(range.end).unwrap_or(u32::MAX);
        Span { start, end }
    }

    /// Create a point span (zero-length).
    #[inline]
    pub const fn point(offset: u32) -> Span {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Merge two spans to create one covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Check if span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Operator binding level. Larger binds looser and sits nearer the root of
/// the expression tree.
///
/// The levels follow the C operator precedence table, scaled by ten so the
/// two prefix operators can share row 2 while staying distinct.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Binding(pub u8);

impl Binding {
    /// Numbers and registers.
    pub const LITERAL: Binding = Binding(0);
    /// `(` and `)`.
    pub const PAREN: Binding = Binding(10);
    /// Prefix `-`.
    pub const NEG: Binding = Binding(21);
    /// Prefix `*`.
    pub const DEREF: Binding = Binding(22);
    /// `*` and `/`.
    pub const MUL: Binding = Binding(30);
    /// Binary `+` and `-`.
    pub const ADD: Binding = Binding(40);
    /// `==` and `!=`.
    pub const EQ: Binding = Binding(70);
    /// `&&`.
    pub const AND: Binding = Binding(110);
    /// `||`.
    pub const OR: Binding = Binding(120);
}

/// Token kinds for debugger expressions.
///
/// `Neg` and `Deref` are never produced by the tokenizer. They replace
/// `Minus` and `Star` during [`disambiguate`](crate::disambiguate).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    EqEq,
    NotEq,
    AndAnd,
    OrOr,
    /// Decimal or `0x` hexadecimal literal.
    Number,
    /// `$name`, sigil included in the lexeme.
    Register,
    /// Prefix `-`.
    Neg,
    /// Prefix `*`, a 4-byte memory read.
    Deref,
}

impl TokenKind {
    /// Binding level assigned when the tokenizer emits this kind.
    pub const fn default_binding(self) -> Binding {
        match self {
            TokenKind::Number | TokenKind::Register => Binding::LITERAL,
            TokenKind::LParen | TokenKind::RParen => Binding::PAREN,
            TokenKind::Neg => Binding::NEG,
            TokenKind::Deref => Binding::DEREF,
            TokenKind::Star | TokenKind::Slash => Binding::MUL,
            TokenKind::Plus | TokenKind::Minus => Binding::ADD,
            TokenKind::EqEq | TokenKind::NotEq => Binding::EQ,
            TokenKind::AndAnd => Binding::AND,
            TokenKind::OrOr => Binding::OR,
        }
    }

    /// Whether tokens of this kind carry their source text.
    #[inline]
    pub const fn has_lexeme(self) -> bool {
        matches!(self, TokenKind::Number | TokenKind::Register)
    }

    /// Source spelling, or `None` for literal kinds.
    pub const fn symbol(self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Plus => "+",
            TokenKind::Minus | TokenKind::Neg => "-",
            TokenKind::Star | TokenKind::Deref => "*",
            TokenKind::Slash => "/",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Number | TokenKind::Register => return None,
        })
    }
}

/// A token with its span and current binding level.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// Matched text; only populated for `Number` and `Register`.
    pub lexeme: Option<&'src str>,
    pub span: Span,
    pub binding: Binding,
}

impl<'src> Token<'src> {
    /// Create a token with the default binding level for `kind`.
    ///
    /// `text` is the matched source slice; it is dropped for kinds that do
    /// not carry a lexeme.
    #[inline]
    pub fn new(kind: TokenKind, text: &'src str, span: Span) -> Self {
        Token {
            kind,
            lexeme: kind.has_lexeme().then_some(text),
            span,
            binding: kind.default_binding(),
        }
    }

    /// Change the kind in place, taking that kind's binding level.
    #[inline]
    pub fn reclassify(&mut self, kind: TokenKind) {
        self.kind = kind;
        self.binding = kind.default_binding();
    }

    /// Source text for this token, for display and re-serialization.
    pub fn text(&self) -> &'src str {
        match (self.lexeme, self.kind.symbol()) {
            (Some(lexeme), _) => lexeme,
            (None, Some(symbol)) => symbol,
            (None, None) => "",
        }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lexeme {
            Some(lexeme) => write!(f, "{:?}({lexeme}) @ {}", self.kind, self.span),
            None => write!(f, "{:?} @ {}", self.kind, self.span),
        }
    }
}

/// Number of tokens kept inline before the list spills to the heap.
const INLINE_TOKENS: usize = 32;

/// Ordered, index-addressed token sequence for one evaluation call.
///
/// Grows without bound; typical console expressions fit in the inline
/// buffer and never allocate.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TokenList<'src> {
    tokens: SmallVec<[Token<'src>; INLINE_TOKENS]>,
}

impl<'src> TokenList<'src> {
    /// Create an empty list.
    pub fn new() -> Self {
        TokenList {
            tokens: SmallVec::new(),
        }
    }

    #[inline]
    pub fn push(&mut self, token: Token<'src>) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token<'src>> {
        self.tokens.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token<'src>] {
        &self.tokens
    }

    /// Kinds in order, mostly useful for assertions.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }

    /// Re-serialize as source text, one space between tokens.
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(token.text());
        }
        out
    }
}

impl<'src> Index<usize> for TokenList<'src> {
    type Output = Token<'src>;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl IndexMut<usize> for TokenList<'_> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.tokens[index]
    }
}

impl<'a, 'src> IntoIterator for &'a TokenList<'src> {
    type Item = &'a Token<'src>;
    type IntoIter = std::slice::Iter<'a, Token<'src>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl fmt::Debug for TokenList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tokens.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn binding_levels_follow_c_precedence() {
        let tightest_to_loosest = [
            TokenKind::Number,
            TokenKind::LParen,
            TokenKind::Neg,
            TokenKind::Deref,
            TokenKind::Star,
            TokenKind::Plus,
            TokenKind::EqEq,
            TokenKind::AndAnd,
            TokenKind::OrOr,
        ];
        for pair in tightest_to_loosest.windows(2) {
            assert!(
                pair[0].default_binding() < pair[1].default_binding(),
                "{:?} should bind tighter than {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn lexeme_only_kept_for_literals() {
        let number = Token::new(TokenKind::Number, "0x10", Span::new(0, 4));
        let plus = Token::new(TokenKind::Plus, "+", Span::new(4, 5));
        assert_eq!(number.lexeme, Some("0x10"));
        assert_eq!(plus.lexeme, None);
        assert_eq!(plus.text(), "+");
    }

    #[test]
    fn reclassify_takes_new_binding() {
        let mut tok = Token::new(TokenKind::Star, "*", Span::new(0, 1));
        tok.reclassify(TokenKind::Deref);
        assert_eq!(tok.kind, TokenKind::Deref);
        assert_eq!(tok.binding, Binding::DEREF);
    }

    #[test]
    fn token_list_spills_past_inline_capacity() {
        let mut list = TokenList::new();
        for i in 0..100u32 {
            list.push(Token::new(TokenKind::Plus, "+", Span::new(i, i + 1)));
        }
        assert_eq!(list.len(), 100);
        assert_eq!(list[99].span, Span::new(99, 100));
    }

    #[test]
    fn span_merge_covers_both() {
        let merged = Span::new(4, 6).merge(Span::new(1, 2));
        assert_eq!(merged, Span::new(1, 6));
        assert_eq!(merged.len(), 5);
    }
}
