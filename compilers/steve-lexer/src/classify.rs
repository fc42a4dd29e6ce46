use nom::{
    bytes::complete::{tag, take_while},
    character::complete::{char, digit1, none_of, satisfy, space1},
    combinator::{opt, recognize},
    sequence::{delimited, pair},
    IResult,
};
use steve_protocol::TokenKind;

use crate::config::ClassifierSet;

/// A recognizer returns the matched prefix of its input.
pub type Recognizer = fn(&str) -> IResult<&str, &str>;

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub fn digits(input: &str) -> IResult<&str, &str> {
    digit1(input)
}

pub fn ident(input: &str) -> IResult<&str, &str> {
    recognize(pair(satisfy(is_ident_start), take_while(is_ident_continue)))(input)
}

pub fn newline(input: &str) -> IResult<&str, &str> {
    tag("\n")(input)
}

/// `'` then at most one character that is neither `'` nor a newline, then `'`.
pub fn single_quoted(input: &str) -> IResult<&str, &str> {
    recognize(delimited(char('\''), opt(none_of("'\n")), char('\'')))(input)
}

/// `"` then any characters other than `"` or a newline, then `"`.
pub fn double_quoted(input: &str) -> IResult<&str, &str> {
    recognize(delimited(char('"'), take_while(|c: char| c != '"' && c != '\n'), char('"')))(input)
}

/// Spaces and tabs. Newlines are tokens of their own.
pub fn blank(input: &str) -> IResult<&str, &str> {
    space1(input)
}

/// A pattern classifier and the token kind it produces.
#[derive(Clone, Copy)]
pub struct Classifier {
    pub kind: TokenKind,
    pub flag: ClassifierSet,
    pub recognize: Recognizer,
}

impl Classifier {
    /// Byte length of the match at the start of `input`. Empty matches count
    /// as failures.
    pub fn match_len(&self, input: &str) -> Option<usize> {
        match (self.recognize)(input) {
            Ok((_, matched)) if !matched.is_empty() => Some(matched.len()),
            _ => None,
        }
    }
}

/// Pattern classifiers in priority order. Symbol tables and the error
/// fallback come after these.
pub const PATTERN_CLASSIFIERS: [Classifier; 5] = [
    Classifier { kind: TokenKind::Digits, flag: ClassifierSet::DIGITS, recognize: digits },
    Classifier { kind: TokenKind::Ident, flag: ClassifierSet::IDENT, recognize: ident },
    Classifier { kind: TokenKind::Newline, flag: ClassifierSet::NEWLINE, recognize: newline },
    Classifier { kind: TokenKind::SQuote, flag: ClassifierSet::SQUOTE, recognize: single_quoted },
    Classifier { kind: TokenKind::DQuote, flag: ClassifierSet::DQUOTE, recognize: double_quoted },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(r: Recognizer, input: &str) -> Option<&str> {
        r(input).ok().map(|(_, m)| m)
    }

    #[test]
    fn test_digits_are_greedy() {
        assert_eq!(matched(digits, "12345abc"), Some("12345"));
        assert_eq!(matched(digits, "x1"), None);
    }

    #[test]
    fn test_ident_shapes() {
        assert_eq!(matched(ident, "x1 = 10"), Some("x1"));
        assert_eq!(matched(ident, "_under_score9+"), Some("_under_score9"));
        assert_eq!(matched(ident, "9lives"), None);
        assert_eq!(matched(ident, "é"), None);
    }

    #[test]
    fn test_newline_is_exactly_one_char() {
        assert_eq!(matched(newline, "\n\n"), Some("\n"));
        assert_eq!(matched(newline, " \n"), None);
    }

    #[test]
    fn test_single_quoted() {
        assert_eq!(matched(single_quoted, "'a'"), Some("'a'"));
        assert_eq!(matched(single_quoted, "''"), Some("''"));
        assert_eq!(matched(single_quoted, "'ab'"), None);
        assert_eq!(matched(single_quoted, "'\n'"), None);
        assert_eq!(matched(single_quoted, "'a"), None);
    }

    #[test]
    fn test_double_quoted() {
        assert_eq!(matched(double_quoted, "\"hello world\" x"), Some("\"hello world\""));
        assert_eq!(matched(double_quoted, "\"\""), Some("\"\""));
        assert_eq!(matched(double_quoted, "\"open\nclose\""), None);
        assert_eq!(matched(double_quoted, "\"unterminated"), None);
    }

    #[test]
    fn test_blank_excludes_newline() {
        assert_eq!(matched(blank, " \t \nx"), Some(" \t "));
        assert_eq!(matched(blank, "\n"), None);
    }

    #[test]
    fn test_classifier_order() {
        let kinds: Vec<TokenKind> = PATTERN_CLASSIFIERS.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Digits,
                TokenKind::Ident,
                TokenKind::Newline,
                TokenKind::SQuote,
                TokenKind::DQuote
            ]
        );
        assert_eq!(PATTERN_CLASSIFIERS[0].match_len("42;"), Some(2));
        assert_eq!(PATTERN_CLASSIFIERS[1].match_len("42;"), None);
    }
}
