//! Read-only navigation over a finished `TokenStream`.
//!
//! Downstream stages walk tokens with lookahead and ask for specific kinds.
//! Mismatches come back as `ExpectError` values carrying the expected kind and
//! what was actually found. End of input is detected by length, since the
//! scanner appends no sentinel token.

use alloc::string::String;
use core::fmt;

use crate::kind::TokenKind;
use crate::token::{Token, TokenStream};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectError {
    Unexpected {
        expected: TokenKind,
        found: TokenKind,
        lexeme: String,
        file: String,
        line: u32,
        column: u32,
    },
    EndOfInput {
        expected: TokenKind,
        file: String,
    },
}

impl ExpectError {
    pub fn expected(&self) -> TokenKind {
        match self {
            ExpectError::Unexpected { expected, .. } | ExpectError::EndOfInput { expected, .. } => {
                *expected
            }
        }
    }
}

impl fmt::Display for ExpectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectError::Unexpected { expected, found, lexeme, file, line, column } => write!(
                f,
                "{}:{}:{}: expected {}, found {} `{}`",
                file,
                line,
                column,
                expected,
                found,
                lexeme.escape_debug()
            ),
            ExpectError::EndOfInput { expected, file } => {
                write!(f, "{}: expected {}, found end of input", file, expected)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ExpectError {}

/// A saved cursor position, see [`TokenCursor::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    stream: &'a TokenStream,
    position: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(stream: &'a TokenStream) -> Self {
        Self { stream, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.stream.len()
    }

    pub fn peek(&self) -> Option<&'a Token> {
        self.stream.tokens.get(self.position)
    }

    pub fn peek_ahead(&self, offset: usize) -> Option<&'a Token> {
        self.stream.tokens.get(self.position + offset)
    }

    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.peek()?;
        self.position += 1;
        Some(token)
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Consumes the next token only if it has `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> Option<&'a Token> {
        if self.check(kind) {
            self.advance()
        } else {
            None
        }
    }

    /// Consumes the next token, which must have `kind`. The cursor does not
    /// move on failure.
    pub fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, ExpectError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.position += 1;
                Ok(token)
            }
            Some(token) => Err(ExpectError::Unexpected {
                expected: kind,
                found: token.kind,
                lexeme: token.lexeme.clone(),
                file: token.file.clone(),
                line: token.line,
                column: token.column,
            }),
            None => Err(ExpectError::EndOfInput { expected: kind, file: self.stream.file.clone() }),
        }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.position)
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.0.min(self.stream.len());
    }

    pub fn remaining(&self) -> &'a [Token] {
        let start = self.position.min(self.stream.len());
        &self.stream.tokens[start..]
    }
}
