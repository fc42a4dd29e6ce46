use steve_protocol::{kind, SymbolEntry, TokenKind};
use thiserror::Error;

/// Construction failures. These are fatal at load time: a lexer is never
/// built from a table that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("unknown symbol `{0}`")]
    Unknown(String),
    #[error("symbol `{0}` listed more than once")]
    Duplicate(String),
    #[error("symbol `{name}` is {found} character(s) wide, table holds {expected}-character symbols")]
    Width { name: String, expected: usize, found: usize },
}

const STANDARD_TWO_CHAR: &[TokenKind] =
    &[TokenKind::EqEq, TokenKind::NtEq, TokenKind::LtEq, TokenKind::GtEq];

const STANDARD_ONE_CHAR: &[TokenKind] = &[
    TokenKind::Dot,
    TokenKind::Eq,
    TokenKind::Semi,
    TokenKind::Comma,
    TokenKind::Colon,
    TokenKind::LParen,
    TokenKind::RParen,
    TokenKind::LBrace,
    TokenKind::RBrace,
    TokenKind::LBrack,
    TokenKind::RBrack,
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Mult,
    TokenKind::Div,
    TokenKind::Mod,
    TokenKind::Not,
    TokenKind::Lt,
    TokenKind::Gt,
];

/// An ordered set of registered symbols of one width.
///
/// Matching walks the entries in construction order and takes the first
/// lexeme that prefixes the input. Tables hold a single width so that the
/// lexer can try every two-character symbol before any one-character one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    width: usize,
    entries: Vec<SymbolEntry>,
}

impl SymbolTable {
    pub fn two_char<S: AsRef<str>>(names: &[S]) -> Result<Self, SymbolError> {
        Self::build(2, names)
    }

    pub fn one_char<S: AsRef<str>>(names: &[S]) -> Result<Self, SymbolError> {
        Self::build(1, names)
    }

    /// `==`, `!=`, `<=`, `>=`.
    pub fn standard_two_char() -> Self {
        Self::from_kinds(2, STANDARD_TWO_CHAR)
    }

    /// Punctuation and single-character operators. `@`, `#`, `$`, `~`, `&`,
    /// `|`, `^` and `\` are registered but left out.
    pub fn standard_one_char() -> Self {
        Self::from_kinds(1, STANDARD_ONE_CHAR)
    }

    fn build<S: AsRef<str>>(width: usize, names: &[S]) -> Result<Self, SymbolError> {
        let mut entries: Vec<SymbolEntry> = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let entry = kind::lookup(name).ok_or_else(|| SymbolError::Unknown(name.to_string()))?;
            if entry.width() != width {
                return Err(SymbolError::Width {
                    name: name.to_string(),
                    expected: width,
                    found: entry.width(),
                });
            }
            if entries.iter().any(|e| e.lexeme == entry.lexeme) {
                return Err(SymbolError::Duplicate(name.to_string()));
            }
            entries.push(entry);
        }
        Ok(Self { width, entries })
    }

    fn from_kinds(width: usize, kinds: &[TokenKind]) -> Self {
        let entries = kinds.iter().filter_map(|k| k.symbol_entry()).collect();
        Self { width, entries }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn contains(&self, kind: TokenKind) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    pub fn match_prefix(&self, input: &str) -> Option<SymbolEntry> {
        self.entries.iter().copied().find(|e| input.starts_with(e.lexeme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tables_pass_validation() {
        let two: Vec<&str> = STANDARD_TWO_CHAR.iter().map(|k| k.name()).collect();
        let one: Vec<&str> = STANDARD_ONE_CHAR.iter().map(|k| k.name()).collect();
        assert_eq!(SymbolTable::two_char(&two), Ok(SymbolTable::standard_two_char()));
        assert_eq!(SymbolTable::one_char(&one), Ok(SymbolTable::standard_one_char()));
    }

    #[test]
    fn test_unknown_name_rejected() {
        let err = SymbolTable::one_char(&["DOT", "ARROW"]).unwrap_err();
        assert_eq!(err, SymbolError::Unknown("ARROW".into()));
        assert_eq!(err.to_string(), "unknown symbol `ARROW`");
    }

    #[test]
    fn test_lexical_class_is_not_a_symbol() {
        assert_eq!(
            SymbolTable::one_char(&["IDENT"]),
            Err(SymbolError::Unknown("IDENT".into()))
        );
    }

    #[test]
    fn test_duplicate_rejected() {
        assert_eq!(
            SymbolTable::two_char(&["EQEQ", "LTEQ", "EQEQ"]),
            Err(SymbolError::Duplicate("EQEQ".into()))
        );
    }

    #[test]
    fn test_width_mismatch_rejected() {
        assert_eq!(
            SymbolTable::two_char(&["EQEQ", "EQ"]),
            Err(SymbolError::Width { name: "EQ".into(), expected: 2, found: 1 })
        );
        assert!(SymbolTable::one_char(&["GTEQ"]).is_err());
    }

    #[test]
    fn test_match_prefix_uses_construction_order() {
        let table = SymbolTable::one_char(&["LT", "EQ"]).unwrap();
        assert_eq!(table.match_prefix("<=").map(|e| e.kind), Some(TokenKind::Lt));
        assert_eq!(table.match_prefix("=<").map(|e| e.kind), Some(TokenKind::Eq));
        assert_eq!(table.match_prefix("!"), None);
        assert_eq!(table.match_prefix(""), None);
    }

    #[test]
    fn test_two_char_table() {
        let table = SymbolTable::standard_two_char();
        assert_eq!(table.width(), 2);
        assert_eq!(table.match_prefix(">=x").map(|e| e.kind), Some(TokenKind::GtEq));
        assert_eq!(table.match_prefix("!=").map(|e| e.lexeme), Some("!="));
        assert_eq!(table.match_prefix(">"), None);
    }

    #[test]
    fn test_empty_table_matches_nothing() {
        let table = SymbolTable::one_char::<&str>(&[]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.match_prefix("+"), None);
    }

    #[test]
    fn test_standard_one_char_leaves_out_at() {
        let table = SymbolTable::standard_one_char();
        assert!(!table.contains(TokenKind::At));
        assert!(table.contains(TokenKind::Not));
        assert_eq!(table.len(), 19);
    }
}
