use steve_protocol::{Token, TokenKind, TokenStream};

use crate::classify;

/// Scan state for one input.
///
/// `remaining` is always a suffix of the original input and `line`/`column`
/// give the position of its first character. A cursor is owned by a single
/// scan and turned into a `TokenStream` when the input runs out.
#[derive(Debug)]
pub struct Cursor<'s> {
    file: String,
    line: u32,
    column: u32,
    remaining: &'s str,
    tokens: Vec<Token>,
}

impl<'s> Cursor<'s> {
    pub fn new(file: impl Into<String>, input: &'s str) -> Self {
        Self { file: file.into(), line: 1, column: 1, remaining: input, tokens: Vec::new() }
    }

    pub fn is_done(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn remaining(&self) -> &'s str {
        self.remaining
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Drops leading spaces and tabs without emitting a token. Returns the
    /// number of bytes skipped.
    pub fn trim(&mut self) -> usize {
        match classify::blank(self.remaining) {
            Ok((rest, skipped)) => {
                self.column = self.column.saturating_add(width(skipped));
                self.remaining = rest;
                skipped.len()
            }
            Err(_) => 0,
        }
    }

    /// Consumes `len` bytes as a token of `kind`.
    ///
    /// `len` must be non-zero and fall on a character boundary of the
    /// remaining input.
    pub(crate) fn step(&mut self, kind: TokenKind, len: usize) {
        debug_assert!(len > 0, "zero-length {} token", kind);
        let (lexeme, rest) = self.remaining.split_at(len);

        let token = Token::new(self.file.as_str(), self.line, self.column, lexeme, kind);
        self.advance_position(lexeme);
        self.remaining = rest;

        if kind != TokenKind::Whitespace {
            self.tokens.push(token);
        }
    }

    pub fn finish(self) -> TokenStream {
        TokenStream::new(self.file, self.tokens)
    }

    // A NEWLINE token moves to column 1 of the next line. Only error tokens
    // swallowing the rest of the input can carry further newlines.
    fn advance_position(&mut self, lexeme: &str) {
        match lexeme.rfind('\n') {
            Some(last) => {
                let breaks = lexeme.bytes().filter(|&b| b == b'\n').count();
                self.line = self.line.saturating_add(breaks as u32);
                self.column = 1 + width(&lexeme[last + 1..]);
            }
            None => self.column = self.column.saturating_add(width(lexeme)),
        }
    }
}

fn width(text: &str) -> u32 {
    u32::try_from(text.chars().count()).unwrap_or(u32::MAX)
}
