//! Element and attribute name tables.
//!
//! Every table is kept sorted so that lookups can binary search.

/// Elements that have no closing tag and no content.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements that get line breaks around them when newlines are enabled.
const NEWLINE_ELEMENTS: &[&str] = &[
    "article", "body", "dd", "details", "div", "dl", "dt", "footer", "form", "h1", "h2", "h3",
    "h4", "h5", "h6", "head", "header", "input", "li", "link", "main", "meta", "ol", "script",
    "section", "summary", "table", "tbody", "thead", "title", "tr", "ul",
];

/// Newline elements that are preceded by a line break even directly after
/// another tag.
const ALWAYS_BREAK_ELEMENTS: &[&str] = &["div", "head", "link", "meta", "title"];

/// Elements that are dropped when they have no content.
const IGNORABLE_EMPTY_ELEMENTS: &[&str] = &["code", "div", "kbd", "p", "samp", "span"];

/// Attributes whose values are URLs.
///
/// See <https://html.spec.whatwg.org/multipage/indices.html#attributes-1>.
const URL_ATTRIBUTES: &[&str] = &[
    "action",
    "cite",
    "data",
    "formaction",
    "href",
    "itemid",
    "itemprop",
    "itemtype",
    "ping",
    "poster",
    "src",
];

#[inline]
fn contains(table: &[&str], name: &str) -> bool {
    table.binary_search(&name).is_ok()
}

pub fn is_void(tag: &str) -> bool {
    contains(VOID_ELEMENTS, tag)
}

pub fn is_newline_tag(tag: &str) -> bool {
    contains(NEWLINE_ELEMENTS, tag)
}

pub fn is_always_break(tag: &str) -> bool {
    contains(ALWAYS_BREAK_ELEMENTS, tag)
}

pub fn is_ignorable_when_empty(tag: &str) -> bool {
    contains(IGNORABLE_EMPTY_ELEMENTS, tag)
}

pub fn is_url_attribute(name: &str) -> bool {
    contains(URL_ATTRIBUTES, name)
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(VOID_ELEMENTS)]
    #[case(NEWLINE_ELEMENTS)]
    #[case(ALWAYS_BREAK_ELEMENTS)]
    #[case(IGNORABLE_EMPTY_ELEMENTS)]
    #[case(URL_ATTRIBUTES)]
    fn test_table_sorted(#[case] table: &[&str]) {
        assert!(table.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_always_break_are_newline_tags() {
        assert!(ALWAYS_BREAK_ELEMENTS.iter().all(|tag| is_newline_tag(tag)));
    }

    #[rstest]
    #[case("br", true)]
    #[case("input", true)]
    #[case("wbr", true)]
    #[case("p", false)]
    #[case("BR", false)]
    fn test_is_void(#[case] tag: &str, #[case] expected: bool) {
        assert_eq!(expected, is_void(tag));
    }
}
