//! Backslash escapes shared by `"..."` strings and `|...|` symbols.
use logos::Logos;
use std::fmt::Write as _;

use crate::lexer::LexerToken;

/// Escape letters and the characters they stand for.
const ESCAPES: &[(char, char)] = &[
    ('"', '"'),
    ('\\', '\\'),
    ('n', '\n'),
    ('r', '\r'),
    ('t', '\t'),
    ('|', '|'),
];

/// Pieces of a delimited body, delimiters already stripped.
#[derive(Debug, Clone, Logos)]
enum Piece {
    #[regex(r#"\\["\\|nrt]"#, |lex| letter_value(lex.slice()[1..].chars().next()?))]
    Escape(char),

    #[regex(r#"\\u\{[a-fA-F0-9]+\}"#, |lex| codepoint(lex.slice()))]
    Codepoint(char),

    #[regex(r#"[^\\]+"#)]
    Run,
}

fn letter_value(letter: char) -> Option<char> {
    ESCAPES
        .iter()
        .find_map(|&(l, value)| (l == letter).then_some(value))
}

/// The letter that escapes `c` inside a body delimited by `delimiter`.
fn escape_letter(c: char, delimiter: char) -> Option<char> {
    if c == '"' || c == '|' {
        return (c == delimiter).then_some(c);
    }
    ESCAPES
        .iter()
        .find_map(|&(letter, value)| (value == c).then_some(letter))
}

/// `\u{HEX}`; fails on surrogates and values beyond the unicode range.
fn codepoint(slice: &str) -> Option<char> {
    let hex = slice.strip_prefix(r"\u{")?.strip_suffix('}')?;
    char::from_u32(u32::from_str_radix(hex, 16).ok()?)
}

/// Resolves the escapes in a string or symbol body.
///
/// Returns `None` for escapes that are not part of the syntax.
pub fn unescape(body: &str) -> Option<String> {
    let mut lexer = Piece::lexer(body);
    let mut output = String::with_capacity(body.len());

    while let Some(piece) = lexer.next() {
        match piece.ok()? {
            Piece::Escape(c) | Piece::Codepoint(c) => output.push(c),
            Piece::Run => output.push_str(lexer.slice()),
        }
    }

    Some(output)
}

fn delimited(body: &str, delimiter: char) -> String {
    let mut output = String::with_capacity(body.len() + 2);
    output.push(delimiter);
    for c in body.chars() {
        match escape_letter(c, delimiter) {
            Some(letter) => {
                let _ = write!(output, "\\{}", letter);
            }
            None => output.push(c),
        }
    }
    output.push(delimiter);
    output
}

/// Writes a symbol so that it reads back as the same symbol.
///
/// Symbols that would lex as anything other than a single bare symbol
/// (numbers, `.`, names with delimiters) are wrapped in `|`.
pub fn escape_symbol(symbol: &str) -> String {
    let mut lexer = LexerToken::lexer(symbol);
    if let Some(Ok(LexerToken::BareSymbol)) = lexer.next() {
        if lexer.span() == (0..symbol.len()) && lexer.next().is_none() {
            return symbol.to_string();
        }
    }
    delimited(symbol, '|')
}

pub fn escape_string(string: &str) -> String {
    delimited(string, '"')
}

#[cfg(test)]
mod test {
    use super::{escape_string, escape_symbol, unescape};
    use rstest::rstest;

    #[rstest]
    #[case("href", "href")]
    #[case("@@@@", "@@@@")]
    #[case("data-src", "data-src")]
    #[case("\n", r#"|\n|"#)]
    #[case(r"\", r#"|\\|"#)]
    #[case("", r#"||"#)]
    #[case("hello world", r#"|hello world|"#)]
    #[case(" world", r#"| world|"#)]
    #[case("(", r#"|(|"#)]
    #[case("17", r#"|17|"#)]
    #[case(".", r#"|.|"#)]
    #[case("a\"b|c", r#"|a"b\|c|"#)]
    fn test_escape_symbol(#[case] string: &str, #[case] expected: &str) {
        assert_eq!(expected, escape_symbol(string));
    }

    #[rstest]
    #[case("abc", r#""abc""#)]
    #[case("a\"b", r#""a\"b""#)]
    #[case("line\n", r#""line\n""#)]
    #[case("a|b", r#""a|b""#)]
    fn test_escape_string(#[case] string: &str, #[case] expected: &str) {
        assert_eq!(expected, escape_string(string));
    }

    #[rstest]
    #[case(r#"\""#, r#"""#)]
    #[case(r"\|", "|")]
    #[case(r"\u{1F60A}", "\u{1F60A}")]
    #[case(r"a\nb", "a\nb")]
    fn test_unescape(#[case] escaped: &str, #[case] expected: &str) {
        assert_eq!(expected, unescape(escaped).unwrap());
    }

    #[rstest]
    #[case(r"\q")]
    #[case(r"trailing\")]
    #[case(r"\u{D800}")]
    #[case(r"\u{110000}")]
    fn test_unescape_rejects(#[case] escaped: &str) {
        assert_eq!(None, unescape(escaped));
    }
}
