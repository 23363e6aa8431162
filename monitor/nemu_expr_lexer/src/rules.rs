//! Declarative lexical rules.
//!
//! Rules are tried in definition order and the first rule that matches at
//! the scan position wins, even when a later rule would match more text.
//! The order is therefore part of the grammar: hex literals come before
//! decimal literals so `0x1f` is never split into `0` and `x1f`.

use regex::Regex;
use std::sync::OnceLock;

use crate::token::TokenKind;

/// What the tokenizer does with text matched by a rule.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum RuleAction {
    /// Consume the text without emitting a token.
    Skip,
    /// Emit a token of this kind.
    Emit(TokenKind),
}

/// A declarative lexical rule.
#[derive(Copy, Clone, Debug)]
pub struct Rule {
    /// Human-readable name for tracing and diagnostics.
    pub name: &'static str,
    /// Unanchored pattern; anchoring is added at compile time.
    pub pattern: &'static str,
    pub action: RuleAction,
}

impl Rule {
    #[inline]
    const fn skip(name: &'static str, pattern: &'static str) -> Self {
        Rule {
            name,
            pattern,
            action: RuleAction::Skip,
        }
    }

    #[inline]
    const fn emit(name: &'static str, pattern: &'static str, kind: TokenKind) -> Self {
        Rule {
            name,
            pattern,
            action: RuleAction::Emit(kind),
        }
    }
}

/// The expression grammar, in priority order.
pub static EXPR_RULES: &[Rule] = &[
    Rule::skip("whitespace", r"[ \t\r\n]+"),
    Rule::emit("plus", r"\+", TokenKind::Plus),
    Rule::emit("minus", r"-", TokenKind::Minus),
    Rule::emit("star", r"\*", TokenKind::Star),
    Rule::emit("slash", r"/", TokenKind::Slash),
    Rule::emit("lparen", r"\(", TokenKind::LParen),
    Rule::emit("rparen", r"\)", TokenKind::RParen),
    Rule::emit("register", r"\$[a-zA-Z0-9]+", TokenKind::Register),
    Rule::emit("hex", r"0[xX][0-9a-fA-F]+", TokenKind::Number),
    Rule::emit("decimal", r"0|[1-9][0-9]*", TokenKind::Number),
    Rule::emit("not_eq", r"!=", TokenKind::NotEq),
    Rule::emit("and", r"&&", TokenKind::AndAnd),
    Rule::emit("or", r"\|\|", TokenKind::OrOr),
    Rule::emit("eq_eq", r"==", TokenKind::EqEq),
];

/// A rule pattern that the regex engine rejected.
#[derive(Debug, thiserror::Error)]
#[error("regex compilation failed for rule `{name}`: {source}\n{pattern}")]
pub struct RuleError {
    pub name: &'static str,
    pub pattern: &'static str,
    #[source]
    pub source: regex::Error,
}

/// A rule paired with its compiled, start-anchored regex.
#[derive(Debug)]
struct CompiledRule {
    rule: Rule,
    regex: Regex,
}

/// Successful match of one rule at a scan position.
#[derive(Copy, Clone, Debug)]
pub struct RuleMatch {
    pub rule: Rule,
    /// Index of the rule in its table.
    pub index: usize,
    /// Matched length in bytes, always non-zero.
    pub len: usize,
}

/// An ordered table of compiled rules.
///
/// Compiled regexes are immutable, so a `RuleSet` can be shared freely
/// between threads once built.
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Compile every rule of `rules`, preserving order.
    pub fn new(rules: &[Rule]) -> Result<Self, RuleError> {
        let rules = rules
            .iter()
            .map(|&rule| {
                Regex::new(&format!("^(?:{})", rule.pattern))
                    .map(|regex| CompiledRule { rule, regex })
                    .map_err(|source| RuleError {
                        name: rule.name,
                        pattern: rule.pattern,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RuleSet { rules })
    }

    /// First rule, in table order, matching `text` exactly at `pos`.
    ///
    /// Empty matches are ignored: they would stall the scan cursor.
    pub fn match_at(&self, text: &str, pos: usize) -> Option<RuleMatch> {
        let rest = text.get(pos..)?;
        self.rules.iter().enumerate().find_map(|(index, compiled)| {
            compiled
                .regex
                .find(rest)
                .filter(|m| m.start() == 0 && !m.is_empty())
                .map(|m| RuleMatch {
                    rule: compiled.rule,
                    index,
                    len: m.end(),
                })
        })
    }

    /// Number of rules in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

static EXPR_RULE_SET: OnceLock<RuleSet> = OnceLock::new();

/// The compiled expression grammar (compiled on first use).
///
/// # Panics
///
/// Panics if a pattern in [`EXPR_RULES`] fails to compile. That is a bug in
/// the table, not a user error, and nothing can be lexed without it.
pub fn rule_set() -> &'static RuleSet {
    EXPR_RULE_SET.get_or_init(|| match RuleSet::new(EXPR_RULES) {
        Ok(set) => set,
        Err(err) => panic!("{err}"),
    })
}
