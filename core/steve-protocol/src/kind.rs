use core::fmt;

use rkyv::{Archive, Deserialize, Serialize};

/// A registered symbol: the token kind it produces and its exact source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolEntry {
    pub kind: TokenKind,
    pub lexeme: &'static str,
}

impl SymbolEntry {
    /// Number of characters in the lexeme. Every registered lexeme is ASCII.
    pub const fn width(&self) -> usize {
        self.lexeme.len()
    }
}

macro_rules! define_token_kinds {
    (
        classes { $($class:ident => $class_name:literal, $class_doc:expr;)* }
        symbols { $($sym:ident => $sym_name:literal, $text:literal;)* }
    ) => {
        /// Classification attached to every token.
        ///
        /// The first group are the lexical classes recognized by pattern; the
        /// second group has one variant per symbol in the canonical registry.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
        #[archive(check_bytes)]
        #[repr(u8)]
        pub enum TokenKind {
            $(#[doc = $class_doc] $class,)*
            $(#[doc = concat!("Registered symbol `", $sym_name, "`.")] $sym,)*
        }

        impl TokenKind {
            /// Every kind, classes first, then symbols in registry order.
            pub const ALL: &'static [TokenKind] = &[
                $(TokenKind::$class,)*
                $(TokenKind::$sym,)*
            ];

            /// Canonical upper-case name, e.g. `"IDENT"` or `"EQEQ"`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(TokenKind::$class => $class_name,)*
                    $(TokenKind::$sym => $sym_name,)*
                }
            }

            /// Registered source text for symbol kinds, `None` for lexical classes.
            pub const fn symbol_text(self) -> Option<&'static str> {
                match self {
                    $(TokenKind::$sym => Some($text),)*
                    _ => None,
                }
            }
        }

        /// The canonical registry every symbol table is validated against.
        pub const SYMBOL_REGISTRY: &[SymbolEntry] = &[
            $(SymbolEntry { kind: TokenKind::$sym, lexeme: $text },)*
        ];
    };
}

define_token_kinds! {
    classes {
        Digits => "DIGITS", "A maximal run of decimal digits.";
        Ident => "IDENT", "A letter or underscore followed by letters, digits or underscores.";
        Whitespace => "WHITESPACE", "Spaces and tabs. Never emitted in a token stream.";
        SQuote => "SQUOTE", "A single-quoted literal holding zero or one character.";
        DQuote => "DQUOTE", "A double-quoted literal without escapes or newlines.";
        Error => "ERROR", "Input no other rule recognized.";
    }
    symbols {
        Newline => "NEWLINE", "\n";
        Dot => "DOT", ".";
        Colon => "COLON", ":";
        Semi => "SEMI", ";";
        Comma => "COMMA", ",";
        LParen => "LPAREN", "(";
        RParen => "RPAREN", ")";
        LBrace => "LBRACE", "{";
        RBrace => "RBRACE", "}";
        LBrack => "LBRACK", "[";
        RBrack => "RBRACK", "]";
        Plus => "PLUS", "+";
        Minus => "MINUS", "-";
        Mult => "MULT", "*";
        Div => "DIV", "/";
        Mod => "MOD", "%";
        Neg => "NEG", "~";
        And => "AND", "&";
        Or => "OR", "|";
        Xor => "XOR", "^";
        At => "AT", "@";
        Pound => "POUND", "#";
        Dollar => "DOLLAR", "$";
        Backslash => "BACKSLASH", "\\";
        Eq => "EQ", "=";
        Not => "NOT", "!";
        Lt => "LT", "<";
        Gt => "GT", ">";
        EqEq => "EQEQ", "==";
        NtEq => "NTEQ", "!=";
        LtEq => "LTEQ", "<=";
        GtEq => "GTEQ", ">=";
    }
}

impl TokenKind {
    /// Looks a kind up by its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    pub const fn is_symbol(self) -> bool {
        self.symbol_text().is_some()
    }

    pub fn symbol_entry(self) -> Option<SymbolEntry> {
        self.symbol_text().map(|lexeme| SymbolEntry { kind: self, lexeme })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Registry lookup by symbol name. Lexical class names such as `"IDENT"` are
/// not symbols and return `None`.
pub fn lookup(name: &str) -> Option<SymbolEntry> {
    TokenKind::from_name(name).and_then(TokenKind::symbol_entry)
}

// Kinds travel through JSON tooling under their canonical names.
#[cfg(feature = "serde")]
impl serde::Serialize for TokenKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TokenKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = <alloc::string::String as serde::Deserialize>::deserialize(deserializer)?;
        TokenKind::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown token kind `{}`", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lexemes_are_distinct() {
        for (i, a) in SYMBOL_REGISTRY.iter().enumerate() {
            for b in &SYMBOL_REGISTRY[i + 1..] {
                assert_ne!(a.lexeme, b.lexeme, "{} and {} share a lexeme", a.kind, b.kind);
            }
        }
    }

    #[test]
    fn test_registry_widths() {
        assert!(SYMBOL_REGISTRY.iter().all(|e| e.width() == 1 || e.width() == 2));
        assert_eq!(lookup("EQEQ").map(|e| e.lexeme), Some("=="));
        assert_eq!(lookup("BACKSLASH").map(|e| e.lexeme), Some("\\"));
        assert_eq!(lookup("NEWLINE").map(|e| e.lexeme), Some("\n"));
    }

    #[test]
    fn test_names_round_trip() {
        for kind in TokenKind::ALL {
            assert_eq!(TokenKind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(TokenKind::from_name("BOGUS"), None);
    }

    #[test]
    fn test_classes_are_not_symbols() {
        assert!(lookup("IDENT").is_none());
        assert!(!TokenKind::Error.is_symbol());
        assert!(TokenKind::GtEq.is_symbol());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_uses_canonical_names() {
        let json = serde_json::to_string(&TokenKind::NtEq).unwrap();
        assert_eq!(json, "\"NTEQ\"");
        let kind: TokenKind = serde_json::from_str("\"LBRACK\"").unwrap();
        assert_eq!(kind, TokenKind::LBrack);
        assert!(serde_json::from_str::<TokenKind>("\"NOPE\"").is_err());
    }
}
