//! Diagnostics for `ERROR` tokens.
//!
//! The scanner always finishes and leaves malformed input in the stream as
//! `ERROR` tokens. Tools that want to report them turn a finished stream into
//! a list of `LexDiagnostic`s; whether any of them should stop compilation is
//! the caller's decision.

use steve_protocol::{Token, TokenStream};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    UnrecognizedInput,
    /// A quote with no matching close on the same line, or a character
    /// literal holding more than one character.
    UnterminatedLiteral,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{file}:{line}:{column}: {}", self.message())]
pub struct LexDiagnostic {
    pub kind: DiagnosticKind,
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub lexeme: String,
}

impl LexDiagnostic {
    pub fn from_token(token: &Token) -> Self {
        let kind = if token.lexeme.starts_with(['\'', '"']) {
            DiagnosticKind::UnterminatedLiteral
        } else {
            DiagnosticKind::UnrecognizedInput
        };
        Self {
            kind,
            file: token.file.clone(),
            line: token.line,
            column: token.column,
            lexeme: token.lexeme.clone(),
        }
    }

    pub fn message(&self) -> String {
        let shown: String = self.lexeme.chars().take(32).collect();
        let ellipsis = if shown.len() < self.lexeme.len() { "..." } else { "" };
        match self.kind {
            DiagnosticKind::UnrecognizedInput => {
                format!("unrecognized input `{}{}`", shown.escape_debug(), ellipsis)
            }
            DiagnosticKind::UnterminatedLiteral => {
                format!("unterminated or malformed literal starting at `{}{}`", shown.escape_debug(), ellipsis)
            }
        }
    }
}

/// One diagnostic per `ERROR` token, in stream order.
///
/// A lone quote that closes an earlier lone quote of the same kind on the same
/// line (the tail of `'ab'`) belongs to the literal already reported and is
/// skipped.
pub fn diagnose(stream: &TokenStream) -> Vec<LexDiagnostic> {
    let mut open_quote: Option<(&str, u32)> = None;
    let mut diagnostics = Vec::new();
    for token in stream.errors() {
        let lone_quote = matches!(token.lexeme.as_str(), "'" | "\"");
        if lone_quote && open_quote == Some((token.lexeme.as_str(), token.line)) {
            open_quote = None;
            continue;
        }
        open_quote = lone_quote.then_some((token.lexeme.as_str(), token.line));
        diagnostics.push(LexDiagnostic::from_token(token));
    }
    diagnostics
}
