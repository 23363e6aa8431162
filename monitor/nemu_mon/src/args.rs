//! Command-line parsing.

use nemu_expr::{DivisionByZero, EvalConfig, SnapshotTarget};

pub const USAGE: &str = "\
Usage: nemu-expr [options] [EXPR]...

Evaluates each EXPR, or one expression per line of stdin when none are given.

Options:
  --reg NAME=VALUE      Define register $NAME (repeatable)
  --mem ADDR=VALUE      Store a 4-byte word at ADDR (repeatable)
  --max-depth=N         Fail expressions nested deeper than N levels
  --abort-on-div-zero   Abort instead of reporting division by zero
  -h, --help            Show this help

VALUE, ADDR and N accept decimal or 0x-prefixed hexadecimal.
Set RUST_LOG (e.g. RUST_LOG=nemu_expr=trace) for tracing output.";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArgError {
    #[error("missing value after `{flag}`")]
    MissingValue { flag: String },
    #[error("expected NAME=VALUE, found `{arg}`")]
    BadAssignment { arg: String },
    #[error("invalid number `{text}`")]
    BadNumber { text: String },
    #[error("unknown option `{flag}`")]
    UnknownFlag { flag: String },
}

/// Everything needed for one run.
#[derive(Debug)]
pub struct Options {
    pub config: EvalConfig,
    pub target: SnapshotTarget,
    /// Empty means read from stdin.
    pub expressions: Vec<String>,
}

#[derive(Debug)]
pub enum Invocation {
    Help,
    Run(Options),
}

/// Parse arguments, not including the program name.
pub fn parse_args(args: &[String]) -> Result<Invocation, ArgError> {
    let mut config = EvalConfig::new();
    let mut target = SnapshotTarget::new();
    let mut expressions = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Invocation::Help),
            "--abort-on-div-zero" => {
                config = config.division_by_zero(DivisionByZero::Abort);
            }
            "--reg" | "--mem" => {
                let value = iter.next().ok_or_else(|| ArgError::MissingValue { flag: arg.clone() })?;
                let (lhs, rhs) = split_assignment(value)?;
                let rhs = parse_number(rhs)?;
                if arg == "--reg" {
                    target.set_register(lhs.trim_start_matches('$'), rhs);
                } else {
                    target = target.with_word(parse_number(lhs)?, rhs);
                }
            }
            other => {
                if let Some(limit) = other.strip_prefix("--max-depth=") {
                    let limit = usize::try_from(parse_number(limit)?).map_err(|_| ArgError::BadNumber {
                        text: limit.to_string(),
                    })?;
                    config = config.max_depth(limit);
                } else if other.starts_with("--") {
                    return Err(ArgError::UnknownFlag {
                        flag: other.to_string(),
                    });
                } else {
                    // `-1+2` is an expression, not a flag
                    expressions.push(other.to_string());
                }
            }
        }
    }

    Ok(Invocation::Run(Options {
        config,
        target,
        expressions,
    }))
}

fn split_assignment(arg: &str) -> Result<(&str, &str), ArgError> {
    arg.split_once('=')
        .filter(|(lhs, rhs)| !lhs.is_empty() && !rhs.is_empty())
        .ok_or_else(|| ArgError::BadAssignment {
            arg: arg.to_string(),
        })
}

/// Decimal or `0x` hexadecimal.
pub fn parse_number(text: &str) -> Result<u32, ArgError> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|_| ArgError::BadNumber {
        text: text.to_string(),
    })
}
