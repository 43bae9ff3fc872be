//! Symbols with a special meaning at the head of a list.

/// Marks the attribute list of an element: `(a (@ (href . "/")) "home")`.
pub const ATTRIBUTE_MARKER: &str = "@";
/// Children are written inside a CDATA section, unescaped.
pub const CDATA: &str = "@C";
/// String children are written unescaped.
pub const NO_ESCAPE: &str = "@H";
/// Children are written as if they were siblings of the list.
pub const LIST_SPLICE: &str = "@L";
/// Children are written into a single-line comment.
pub const INLINE_COMMENT: &str = "@@";
/// Children are written into a comment, one line each.
pub const BLOCK_COMMENT: &str = "@@@";
/// Writes the HTML doctype followed by the children.
pub const DOCTYPE: &str = "@@@@";

/// How a list is rendered, decided by its head symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Head<'a> {
    Tag(&'a str),
    Cdata,
    NoEscape,
    ListSplice,
    InlineComment,
    BlockComment,
    Doctype,
}

impl<'a> Head<'a> {
    /// Classifies a head symbol. Unknown names are tags.
    pub fn of(name: &'a str) -> Self {
        match name {
            CDATA => Head::Cdata,
            NO_ESCAPE => Head::NoEscape,
            LIST_SPLICE => Head::ListSplice,
            INLINE_COMMENT => Head::InlineComment,
            BLOCK_COMMENT => Head::BlockComment,
            DOCTYPE => Head::Doctype,
            name => Head::Tag(name),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Head;
    use rstest::rstest;

    #[rstest]
    #[case("@C", Head::Cdata)]
    #[case("@H", Head::NoEscape)]
    #[case("@L", Head::ListSplice)]
    #[case("@@", Head::InlineComment)]
    #[case("@@@", Head::BlockComment)]
    #[case("@@@@", Head::Doctype)]
    #[case("@", Head::Tag("@"))]
    #[case("@X", Head::Tag("@X"))]
    #[case("html", Head::Tag("html"))]
    fn test_head(#[case] name: &str, #[case] expected: Head<'static>) {
        assert_eq!(expected, Head::of(name));
    }
}
