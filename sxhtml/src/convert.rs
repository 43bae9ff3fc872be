//! Conversion from [`dom`](crate::dom) trees into s-expressions.
use sx::Value;

use crate::directive::{BLOCK_COMMENT, NO_ESCAPE};
use crate::dom::{Element, Node};
use crate::tracing_macros::debug;

/// An error while converting a document tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("empty tag name")]
    EmptyTagName,
    #[error("empty attribute name on <{0}>")]
    EmptyAttributeName(String),
}

/// Converts a node into a tree that renders to the same HTML.
///
/// Elements become `(tag ((key . "value") ...) children...)`, raw markup
/// becomes `(@H "...")` and comments become `(@@@ "...")`.
pub fn to_sx(node: &Node) -> Result<Value, ConvertError> {
    match node {
        Node::Text(text) => Ok(Value::string(text.as_str())),
        Node::Raw(html) => Ok(Value::list([
            Value::symbol(NO_ESCAPE),
            Value::string(html.as_str()),
        ])),
        Node::Comment(text) => Ok(Value::list([
            Value::symbol(BLOCK_COMMENT),
            Value::string(text.as_str()),
        ])),
        Node::Element(element) => element_to_sx(element),
    }
}

fn element_to_sx(element: &Element) -> Result<Value, ConvertError> {
    let tag = element.tag.trim();
    if tag.is_empty() {
        debug!(tag = %element.tag, "rejecting element without a name");
        return Err(ConvertError::EmptyTagName);
    }

    let mut items = Vec::with_capacity(element.children.len() + 2);
    items.push(Value::symbol(tag));

    if !element.attrs.is_empty() {
        let attrs = element
            .attrs
            .iter()
            .map(|(key, value)| {
                let key = key.trim();
                if key.is_empty() {
                    debug!(tag, "rejecting attribute without a name");
                    return Err(ConvertError::EmptyAttributeName(tag.to_string()));
                }
                Ok(Value::cons(Value::symbol(key), Value::string(value.as_str())))
            })
            .collect::<Result<Vec<_>, _>>()?;
        items.push(Value::List(attrs));
    }

    for child in &element.children {
        items.push(to_sx(child)?);
    }

    Ok(Value::List(items))
}

#[cfg(test)]
mod test {
    use super::{to_sx, ConvertError};
    use crate::dom::{Element, Node};
    use crate::Generator;
    use rstest::rstest;

    #[rstest]
    #[case(Node::text("abc"), r#""abc""#)]
    #[case(Element::new("br").into(), "(br)")]
    #[case(
        Element::new("a")
            .attr("href", "https://t73f.de")
            .child(Node::text("Detlef Stern"))
            .into(),
        r#"(a ((href . "https://t73f.de")) "Detlef Stern")"#
    )]
    #[case(Node::raw("very raw"), r#"(@H "very raw")"#)]
    #[case(Node::comment("just a comment"), r#"(@@@ "just a comment")"#)]
    #[case(
        Element::new("ol")
            .attr("start", "17")
            .attr("reversed", "")
            .child(Element::new("li").attr("value", "one").child(Node::text("1")))
            .child(Element::new("li").attr("value", "three").child(Node::text("3")))
            .into(),
        r#"(ol ((start . "17") (reversed . "")) (li ((value . "one")) "1") (li ((value . "three")) "3"))"#
    )]
    #[case(Element::new(" p ").into(), "(p)")]
    fn test_to_sx(#[case] node: Node, #[case] expected: &str) {
        assert_eq!(expected, to_sx(&node).unwrap().to_string());
    }

    #[rstest]
    #[case(
        Element::new("span").child(Element::new("")).into(),
        ConvertError::EmptyTagName
    )]
    #[case(
        Element::new("span").attr(" ", "val").into(),
        ConvertError::EmptyAttributeName("span".to_string())
    )]
    fn test_to_sx_errors(#[case] node: Node, #[case] expected: ConvertError) {
        assert_eq!(expected, to_sx(&node).unwrap_err());
    }

    #[test]
    fn test_converted_tree_renders() {
        let node: Node = Element::new("p")
            .attr("class", "note")
            .child(Node::text("a < b"))
            .child(Node::comment("x--y"))
            .child(Element::new("img").attr("src", "/a b.png"))
            .into();

        let html = Generator::new().to_html(&to_sx(&node).unwrap());
        assert_eq!(
            "<p class=\"note\">a &lt; b<!--\nx-&#45;y\n-->\n<img src=\"/a%20b.png\"></p>",
            html
        );
    }
}
