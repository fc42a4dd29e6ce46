use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::format::{FieldFormatter, Formattable};
use crate::kind::TokenKind;

/// A classified, positioned piece of source text.
///
/// `line` and `column` are 1-based; the column counts characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Token {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub lexeme: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(
        file: impl Into<String>,
        line: u32,
        column: u32,
        lexeme: impl Into<String>,
        kind: TokenKind,
    ) -> Self {
        Self { file: file.into(), line, column, lexeme: lexeme.into(), kind }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }

    /// Length of the lexeme in characters.
    pub fn width(&self) -> usize {
        self.lexeme.chars().count()
    }
}

impl Formattable for Token {
    fn format_fields(&self, f: &mut FieldFormatter) {
        f.begin("Token")
            .pair("File", &self.file)
            .pair("Line #", self.line)
            .pair("Col #", self.column);
        // The newline lexeme is not printable.
        if self.kind != TokenKind::Newline {
            f.pair("Value", &self.lexeme);
        }
        f.pair("Type", self.kind).end();
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_formatted())
    }
}

/// The ordered result of scanning one file.
///
/// There is no end-of-stream token; consumers stop at `len()`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct TokenStream {
    pub file: String,
    pub tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new(file: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self { file: file.into(), tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn kinds(&self) -> impl Iterator<Item = TokenKind> + '_ {
        self.tokens.iter().map(|t| t.kind)
    }

    pub fn has_errors(&self) -> bool {
        self.tokens.iter().any(Token::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter().filter(|t| t.is_error())
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = core::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl Formattable for TokenStream {
    fn format_fields(&self, f: &mut FieldFormatter) {
        f.begin("TokenStream").pair("File", &self.file).list("Tokens", &self.tokens).end();
    }
}

impl fmt::Display for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_formatted())
    }
}
