//! # malph
//!
//! An interpreter for a small fixed-grammar toy language: keyword-based
//! variable declarations, `Vi`/`War` conditional and loop constructs guarded
//! by two-operand comparisons, and a single `imp` print primitive.
//!
//! The crate is the core behind a presentation layer it deliberately knows
//! nothing about: [`tokenize`] exposes the raw token stream, and
//! [`Analyzer::run`] performs one full lex + parse + execute pass, leaving
//! the print-output log and the live symbol table behind for display.

pub mod ast;
pub mod common;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod symbol;
pub mod token;

use std::collections::HashMap;
use std::sync::atomic::AtomicBool;

use crate::{
    common::Value,
    interpreter::Interpreter,
    lexer::Lexer,
    symbol::{Entry, SymbolTable},
    token::TokenKind,
};

/// One token as the presentation layer sees it: its kind plus the literal
/// value (the parsed integer for numbers, the lexeme for everything else,
/// quotes already stripped from string literals).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedToken {
    pub kind: TokenKind,
    pub value: Value,
}

/// Scans `source` into its full token list. Never fails: unknown characters
/// are skipped with a logged warning and scanning continues.
pub fn tokenize(source: &str) -> Vec<ScannedToken> {
    let mut lexer = Lexer::from_str(source);
    let tokens = lexer.lex();

    tokens
        .iter()
        .filter(|token| token.kind != TokenKind::Eof)
        .map(|token| {
            let text: String = lexer.source[token.span.clone()].iter().collect();
            let value = if token.kind == TokenKind::Number {
                Value::Int(text.parse().unwrap_or(i64::MAX))
            } else {
                Value::Str(text)
            };
            ScannedToken {
                kind: token.kind,
                value,
            }
        })
        .collect()
}

/// The outcome of one run. `success` holds exactly when the diagnostics
/// list is empty; lexical warnings travel separately and never fail a run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub success: bool,
    pub diagnostics: Vec<String>,
    pub warnings: Vec<String>,
}

/// One interpreter session. The symbol table and the print-output log live
/// here and persist across [`Analyzer::run`] calls, so a consumer can
/// declare in one submission and print in the next; each run starts with a
/// fresh diagnostics list. Concurrent consumers each get their own
/// `Analyzer` — nothing is shared.
#[derive(Debug, Default)]
pub struct Analyzer {
    symbols: SymbolTable,
    outputs: Vec<String>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// One full tokenize + parse + execute pass over `source`.
    ///
    /// A `War` loop whose condition never turns false spins this call
    /// forever; use [`Analyzer::run_with_cancel`] when the caller needs a
    /// way out.
    pub fn run(&mut self, source: &str) -> RunReport {
        self.run_with_cancel(source, &AtomicBool::new(false))
    }

    /// Like [`Analyzer::run`], with a cooperative cancellation flag checked
    /// on every loop iteration. A cancelled run reports a diagnostic and
    /// keeps whatever output it produced up to that point.
    pub fn run_with_cancel(&mut self, source: &str, cancel: &AtomicBool) -> RunReport {
        let mut lexer = Lexer::from_str(source);
        let tokens = lexer.lex();
        let warnings = lexer.take_warnings();

        let parsed = parser::parse(&lexer.source, &tokens);
        let file = ast::File {
            source: lexer.source,
            exprs: parsed.exprs,
        };
        tracing::debug!(
            tokens = tokens.len(),
            exprs = file.exprs.len(),
            "parsed source"
        );

        // The original engine executed while recognizing, so everything
        // parsed ahead of a syntax error still runs; the error itself is
        // reported after those effects.
        let mut diagnostics = Vec::new();
        Interpreter::new(
            &file,
            &mut self.symbols,
            &mut self.outputs,
            &mut diagnostics,
            cancel,
        )
        .execute();

        if let Some(error) = parsed.error {
            diagnostics.push(error);
        }

        RunReport {
            success: diagnostics.is_empty(),
            diagnostics: diagnostics.iter().map(ToString::to_string).collect(),
            warnings: warnings.iter().map(ToString::to_string).collect(),
        }
    }

    /// Drains the accumulated print-instruction results.
    pub fn take_output_log(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outputs)
    }

    /// A copy of the live symbol table: declared type and current value per
    /// name.
    pub fn snapshot_symbols(&self) -> HashMap<String, Entry> {
        self.symbols.snapshot()
    }
}
