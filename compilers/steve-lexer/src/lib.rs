pub mod classify;
pub mod config;
pub mod cursor;
pub mod diagnostics;
pub mod symbols;

use steve_protocol::{TokenKind, TokenStream};

use crate::classify::PATTERN_CLASSIFIERS;
use crate::cursor::Cursor;

pub use crate::config::{ClassifierSet, ErrorRecovery, LexerConfig};
pub use crate::diagnostics::{diagnose, DiagnosticKind, LexDiagnostic};
pub use crate::symbols::{SymbolError, SymbolTable};

/// The scanner.
///
/// A `Lexer` only holds validated, immutable tables, so one instance can be
/// shared by reference between any number of concurrent scans. Every call to
/// [`Lexer::lex`] gets a fresh [`Cursor`].
#[derive(Debug, Clone)]
pub struct Lexer {
    two_char: SymbolTable,
    one_char: SymbolTable,
    classifiers: ClassifierSet,
    recovery: ErrorRecovery,
}

impl Lexer {
    pub fn new(config: &LexerConfig) -> Result<Self, SymbolError> {
        let (two_char, one_char) = config.tables()?;
        Ok(Self { two_char, one_char, classifiers: config.classifiers, recovery: config.recovery })
    }

    /// Standard symbol tables, every classifier, single-character recovery.
    pub fn standard() -> Self {
        Self {
            two_char: SymbolTable::standard_two_char(),
            one_char: SymbolTable::standard_one_char(),
            classifiers: ClassifierSet::default(),
            recovery: ErrorRecovery::default(),
        }
    }

    pub fn two_char(&self) -> &SymbolTable {
        &self.two_char
    }

    pub fn one_char(&self) -> &SymbolTable {
        &self.one_char
    }

    pub fn recovery(&self) -> ErrorRecovery {
        self.recovery
    }

    /// Primary entry point: Text -> Positioned Tokens
    ///
    /// Never fails. Input nothing else recognizes becomes `ERROR` tokens.
    pub fn lex(&self, file: &str, source: &str) -> TokenStream {
        let mut cursor = Cursor::new(file, source);

        while !cursor.is_done() {
            cursor.trim();
            // Trailing blanks leave nothing to classify.
            let Some((kind, len)) = self.classify(cursor.remaining()) else {
                break;
            };
            cursor.step(kind, len);
        }

        cursor.finish()
    }

    /// Kind and byte length of the token at the start of `input`, `None` once
    /// the input is empty. Pattern classifiers go first, then every
    /// two-character symbol, then every one-character symbol, so `>=` is never
    /// split.
    pub(crate) fn classify(&self, input: &str) -> Option<(TokenKind, usize)> {
        if input.is_empty() {
            return None;
        }
        let patterns = PATTERN_CLASSIFIERS.iter().filter(|c| self.classifiers.contains(c.flag));
        for classifier in patterns {
            if let Some(len) = classifier.match_len(input) {
                return Some((classifier.kind, len));
            }
        }

        for table in [&self.two_char, &self.one_char] {
            if let Some(entry) = table.match_prefix(input) {
                return Some((entry.kind, entry.lexeme.len()));
            }
        }

        Some((TokenKind::Error, self.error_len(input)))
    }

    fn error_len(&self, input: &str) -> usize {
        match self.recovery {
            ErrorRecovery::SingleChar => input.chars().next().map_or(0, char::len_utf8),
            ErrorRecovery::Remainder => input.len(),
        }
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::standard()
    }
}

/// Scans `source` with the standard lexer.
pub fn lex(file: &str, source: &str) -> TokenStream {
    Lexer::standard().lex(file, source)
}
