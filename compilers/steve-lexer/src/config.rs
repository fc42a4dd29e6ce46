use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::symbols::{SymbolError, SymbolTable};

bitflags! {
    /// Pattern classifiers the lexer runs before consulting the symbol tables.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct ClassifierSet: u8 {
        const DIGITS = 1;
        const IDENT = 2;
        const NEWLINE = 4;
        const SQUOTE = 8;
        const DQUOTE = 16;

        const QUOTES = Self::SQUOTE.bits() | Self::DQUOTE.bits();
    }
}

impl Default for ClassifierSet {
    fn default() -> Self {
        Self::all()
    }
}

/// How much input an `ERROR` token swallows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ErrorRecovery {
    /// One character, then scanning resumes.
    #[default]
    SingleChar,
    /// Everything left in the input.
    Remainder,
}

/// Everything needed to build a [`crate::Lexer`].
///
/// Symbol tables are given by canonical registry names and validated when the
/// lexer is built, not when the config is read.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct LexerConfig {
    pub two_char: Vec<String>,
    pub one_char: Vec<String>,
    pub classifiers: ClassifierSet,
    pub recovery: ErrorRecovery,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            two_char: names(&SymbolTable::standard_two_char()),
            one_char: names(&SymbolTable::standard_one_char()),
            classifiers: ClassifierSet::default(),
            recovery: ErrorRecovery::default(),
        }
    }
}

impl LexerConfig {
    pub fn with_recovery(mut self, recovery: ErrorRecovery) -> Self {
        self.recovery = recovery;
        self
    }

    pub fn with_classifiers(mut self, classifiers: ClassifierSet) -> Self {
        self.classifiers = classifiers;
        self
    }

    pub fn with_one_char<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.one_char = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_two_char<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.two_char = names.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn tables(&self) -> Result<(SymbolTable, SymbolTable), SymbolError> {
        Ok((SymbolTable::two_char(&self.two_char)?, SymbolTable::one_char(&self.one_char)?))
    }
}

fn names(table: &SymbolTable) -> Vec<String> {
    table.entries().iter().map(|e| e.kind.name().to_string()).collect()
}
