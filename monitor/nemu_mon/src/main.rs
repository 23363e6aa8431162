//! NEMU expression console.
//!
//! Evaluates debugger expressions against a register/memory snapshot given
//! on the command line, the way the monitor's `p` command would.

mod args;

use std::io::{self, BufRead};
use std::sync::Once;

use nemu_expr::{EvalError, Evaluator, SnapshotTarget};

use crate::args::{parse_args, Invocation, USAGE};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Only installs a subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=nemu_expr_lexer=trace` to see every rule match.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(io::stderr))
                .with(filter)
                .init();
        }
    });
}

/// Console rendering of a value: hex and decimal.
fn format_value(value: u32) -> String {
    format!("0x{value:08x} ({value})")
}

/// Console rendering of a failure; lexical errors get a caret line.
fn format_error(text: &str, err: &EvalError) -> String {
    match err {
        EvalError::Lex(lex) => format!("error: {err}\n{}", lex.caret_line(text)),
        _ => format!("error: {err}"),
    }
}

/// Evaluate and print one expression. Returns whether it succeeded.
fn run_one(evaluator: &Evaluator, target: &SnapshotTarget, text: &str) -> bool {
    match evaluator.evaluate(text, target) {
        Ok(value) => {
            println!("{}", format_value(value));
            true
        }
        Err(err) => {
            tracing::warn!(expression = text, %err, "evaluation failed");
            eprintln!("{}", format_error(text, &err));
            false
        }
    }
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(Invocation::Help) => {
            println!("{USAGE}");
            return;
        }
        Ok(Invocation::Run(options)) => options,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    let evaluator = Evaluator::new(options.config);
    let mut all_ok = true;

    if options.expressions.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    eprintln!("error: failed to read stdin: {err}");
                    std::process::exit(1);
                }
            };
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            all_ok &= run_one(&evaluator, &options.target, text);
        }
    } else {
        for text in &options.expressions {
            all_ok &= run_one(&evaluator, &options.target, text);
        }
    }

    if !all_ok {
        std::process::exit(1);
    }
}
