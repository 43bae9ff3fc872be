//! Escaping for the syntactic positions of an HTML document.
//!
//! All functions borrow their input when nothing needs to be replaced.
use std::borrow::Cow;
use std::fmt::Write as _;

const REPLACEMENT_CHARACTER: &str = "\u{FFFD}";

/// Replaces every character for which `replacement` returns a string.
fn replace_chars(str: &str, replacement: impl Fn(char) -> Option<&'static str>) -> Cow<'_, str> {
    let Some(first) = str.find(|c| replacement(c).is_some()) else {
        return Cow::Borrowed(str);
    };

    let mut output = String::with_capacity(str.len() + 16);
    output.push_str(&str[..first]);

    for c in str[first..].chars() {
        match replacement(c) {
            Some(escaped) => output.push_str(escaped),
            None => output.push(c),
        }
    }

    Cow::Owned(output)
}

/// Escapes text content.
pub fn escape_text(str: &str) -> Cow<'_, str> {
    replace_chars(str, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\0' => Some(REPLACEMENT_CHARACTER),
        _ => None,
    })
}

/// Escapes an attribute value that is written between double quotes.
///
/// Uses the same replacements as [`escape_text`]. The quotes themselves are
/// not part of the output.
pub fn escape_attribute_value(str: &str) -> Cow<'_, str> {
    escape_text(str)
}

/// Escapes the text of a comment so that it can not close the comment.
pub fn escape_comment(str: &str) -> Cow<'_, str> {
    if str.contains("--") {
        Cow::Owned(str.replace("--", "-&#45;"))
    } else {
        Cow::Borrowed(str)
    }
}

#[inline]
fn is_url_safe(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'-' | b'.'
                | b'_'
                | b'~'
                | b'!'
                | b'#'
                | b'$'
                | b'&'
                | b'*'
                | b'+'
                | b','
                | b'/'
                | b':'
                | b';'
                | b'='
                | b'?'
                | b'@'
                | b'['
                | b']'
        )
}

/// Percent-encodes a URL.
///
/// Unreserved characters and delimiters are kept, as is `%` when it already
/// starts a `%XX` escape. Every other character is written as the escapes of
/// its UTF-8 bytes.
pub fn escape_url(str: &str) -> Cow<'_, str> {
    let bytes = str.as_bytes();
    let keep = |(i, c): (usize, char)| {
        if c.is_ascii() && is_url_safe(c as u8) {
            return true;
        }
        c == '%'
            && matches!(
                bytes.get(i + 1..i + 3),
                Some([a, b]) if a.is_ascii_hexdigit() && b.is_ascii_hexdigit()
            )
    };

    let Some((first, _)) = str.char_indices().find(|&item| !keep(item)) else {
        return Cow::Borrowed(str);
    };

    let mut output = String::with_capacity(str.len() + 32);
    output.push_str(&str[..first]);

    let mut utf8 = [0; 4];
    for (i, c) in str[first..].char_indices() {
        if keep((first + i, c)) {
            output.push(c);
            continue;
        }
        for byte in c.encode_utf8(&mut utf8).bytes() {
            let _ = write!(output, "%{:02x}", byte);
        }
    }

    Cow::Owned(output)
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("plain", "plain")]
    #[case("&amp;", "&amp;amp;")]
    #[case("<b>", "&lt;b&gt;")]
    #[case(r#"say "hi""#, "say &quot;hi&quot;")]
    #[case("a\0b", "a\u{FFFD}b")]
    #[case("Äöü", "Äöü")]
    fn test_escape_text(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(expected, escape_text(text));
    }

    #[rstest]
    #[case(r#"""#, "&quot;")]
    #[case("a&b", "a&amp;b")]
    #[case("<x>", "&lt;x&gt;")]
    #[case("a\0b", "a\u{FFFD}b")]
    fn test_escape_attribute_value(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(expected, escape_attribute_value(value));
    }

    #[rstest]
    #[case("comment", "comment")]
    #[case("esc -->", "esc -&#45;>")]
    #[case("-------->", "-&#45;-&#45;-&#45;-&#45;>")]
    #[case("-----", "-&#45;-&#45;-")]
    fn test_escape_comment(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(expected, escape_comment(text));
    }

    #[rstest]
    #[case("https://x", "https://x")]
    #[case("search?q=%&r=Ä", "search?q=%25&r=%c3%84")]
    #[case("a b", "a%20b")]
    #[case("already%20done", "already%20done")]
    #[case("half%2", "half%252")]
    #[case("%4A%4a", "%4A%4a")]
    #[case("trailing%", "trailing%25")]
    #[case("{x}", "%7bx%7d")]
    #[case("Ä", "%c3%84")]
    #[case("/®/%41", "/%c2%ae/%41")]
    #[case("ᢰ", "%e1%a2%b0")]
    #[case("𑻩x", "%f0%91%bb%a9x")]
    fn test_escape_url(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(expected, escape_url(url));
    }

    #[test]
    fn test_borrows_when_unchanged() {
        assert!(matches!(escape_text("abc"), Cow::Borrowed(_)));
        assert!(matches!(escape_url("/a/b"), Cow::Borrowed(_)));
        assert!(matches!(escape_comment("a-b"), Cow::Borrowed(_)));
    }

    proptest! {
        #[test]
        fn url_output_is_ascii_and_quotable(url: String) {
            let escaped = escape_url(&url);
            prop_assert!(escaped.is_ascii());
            prop_assert!(!escaped.contains(|c: char| c.is_ascii_whitespace() || c == '"' || c == '<'));
        }

        #[test]
        fn comment_never_contains_double_dash(text: String) {
            prop_assert!(!escape_comment(&text).contains("--"));
        }

        #[test]
        fn text_has_no_markup(text: String) {
            let escaped = escape_text(&text);
            prop_assert!(!escaped.contains(['<', '>', '"', '\0']));
        }
    }
}
