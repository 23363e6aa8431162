use pretty_assertions::assert_eq;

use super::*;
use crate::rules::{Rule, EXPR_RULES};
use crate::token::TokenKind::{self, *};

fn kinds(text: &str) -> Vec<TokenKind> {
    match tokenize(text) {
        Ok(tokens) => tokens.kinds(),
        Err(err) => panic!("unexpected lex error for {text:?}: {err}"),
    }
}

fn lexemes(text: &str) -> Vec<Option<&str>> {
    match tokenize(text) {
        Ok(tokens) => tokens.iter().map(|t| t.lexeme).collect(),
        Err(err) => panic!("unexpected lex error for {text:?}: {err}"),
    }
}

// === Basic Tokens ===

#[test]
fn empty_input_yields_no_tokens() {
    assert_eq!(kinds(""), vec![]);
    assert_eq!(kinds("   \t "), vec![]);
}

#[test]
fn arithmetic_operators() {
    assert_eq!(
        kinds("(1+2)*3/4-5"),
        vec![LParen, Number, Plus, Number, RParen, Star, Number, Slash, Number, Minus, Number]
    );
}

#[test]
fn comparison_and_logic_operators() {
    assert_eq!(
        kinds("1==2 != 3 && 4 || 5"),
        vec![Number, EqEq, Number, NotEq, Number, AndAnd, Number, OrOr, Number]
    );
}

#[test]
fn tokenizer_never_emits_prefix_kinds() {
    assert_eq!(kinds("-*-1"), vec![Minus, Star, Minus, Number]);
}

// === Literals ===

#[test]
fn number_lexemes_are_verbatim() {
    assert_eq!(
        lexemes("0x1F 42 0XaB 0"),
        vec![Some("0x1F"), Some("42"), Some("0XaB"), Some("0")]
    );
}

#[test]
fn register_lexeme_keeps_sigil() {
    assert_eq!(lexemes("$pc + $eax"), vec![Some("$pc"), None, Some("$eax")]);
}

#[test]
fn leading_zero_splits_into_two_numbers() {
    assert_eq!(lexemes("012"), vec![Some("0"), Some("12")]);
}

// === Spans ===

#[test]
fn spans_exclude_whitespace() {
    let tokens = tokenize("  12 +  $a").unwrap_or_default();
    let spans: Vec<_> = tokens.iter().map(|t| t.span).collect();
    assert_eq!(spans, vec![Span::new(2, 4), Span::new(5, 6), Span::new(8, 10)]);
}

#[test]
fn long_expression_is_not_truncated() {
    let text = vec!["1"; 200].join("+");
    assert_eq!(tokenize(&text).map(|t| t.len()), Ok(399));
}

// === Errors ===

#[test]
fn unknown_character_reports_position() {
    let err = tokenize("1 + @2").err();
    assert_eq!(
        err,
        Some(LexError {
            position: 4,
            remaining: "@2".to_string()
        })
    );
}

#[test]
fn single_equals_is_rejected() {
    assert_eq!(tokenize("1 = 1").err().map(|e| e.position), Some(2));
}

#[test]
fn lone_ampersand_and_pipe_are_rejected() {
    assert_eq!(tokenize("1 & 1").err().map(|e| e.position), Some(2));
    assert_eq!(tokenize("1 | 1").err().map(|e| e.position), Some(2));
}

#[test]
fn non_ascii_input_is_rejected_not_split() {
    let err = tokenize("1+é");
    assert_eq!(err.err().map(|e| e.remaining), Some("é".to_string()));
}

// === Custom Tables ===

#[test]
fn custom_table_without_whitespace_rule_stops_at_space() {
    let rules = [Rule {
        name: "digits",
        pattern: "[0-9]+",
        action: RuleAction::Emit(Number),
    }];
    let Ok(set) = RuleSet::new(&rules) else {
        panic!("table should compile");
    };
    assert_eq!(tokenize_with(&set, "12 3").err().map(|e| e.position), Some(2));
}

#[test]
fn swapping_non_overlapping_rules_keeps_output() {
    let mut swapped: Vec<Rule> = EXPR_RULES.to_vec();
    // plus and minus can never match at the same anchor
    swapped.swap(1, 2);
    let Ok(set) = RuleSet::new(&swapped) else {
        panic!("table should compile");
    };
    let text = "-1 + 2 - -3";
    assert_eq!(
        tokenize_with(&set, text).map(|t| t.kinds()),
        tokenize(text).map(|t| t.kinds())
    );
}
