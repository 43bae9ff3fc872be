//! The tree walker that writes HTML.
use std::borrow::Cow;
use std::io::{self, Write};

use sx::printer::Shaped;
use sx::{Shape, Tree};

use crate::attrs::{assemble, attribute_list};
use crate::directive::Head;
use crate::escape::{escape_comment, escape_text};
use crate::tables;
use crate::tracing_macros::{debug, trace};

/// State of a single render call.
///
/// Writes stop at the first sink error, which is kept and reported when the
/// walk is finished. The walk itself always runs to the end.
pub(crate) struct Encoder<W> {
    sink: W,
    newline: bool,
    /// Whether the last thing written was a tag that ended a line.
    last_was_tag: bool,
    written: usize,
    error: Option<io::Error>,
}

impl<W: Write> Encoder<W> {
    pub fn new(sink: W, newline: bool) -> Self {
        Self {
            sink,
            newline,
            last_was_tag: true,
            written: 0,
            error: None,
        }
    }

    /// Number of bytes written, or the first write error.
    pub fn finish(self) -> io::Result<usize> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.written),
        }
    }

    fn write_str(&mut self, str: &str) {
        if self.error.is_some() || str.is_empty() {
            return;
        }

        match self.sink.write_all(str.as_bytes()) {
            Ok(()) => self.written += str.len(),
            Err(err) => {
                debug!(written = self.written, error = %err, "HTML output failed");
                self.error = Some(err);
            }
        }
    }

    fn write_strs(&mut self, strs: &[&str]) {
        for str in strs {
            self.write_str(str);
        }
    }

    pub fn generate<T: Tree>(&mut self, node: &T) {
        match node.shape() {
            Shape::String(text) => {
                self.write_str(&escape_text(text));
                self.last_was_tag = false;
            }
            Shape::Number(number) => {
                self.write_str(&escape_text(&number.to_string()));
                self.last_was_tag = false;
            }
            Shape::List(items) => self.generate_list(items),
            Shape::Nil | Shape::Symbol(_) | Shape::Pair(..) => self.last_was_tag = false,
        }
    }

    fn generate_all<T: Tree>(&mut self, nodes: &[T]) {
        for node in nodes {
            self.generate(node);
        }
    }

    fn generate_list<T: Tree>(&mut self, items: &[T]) {
        let Some((head, children)) = items.split_first() else {
            self.last_was_tag = false;
            return;
        };
        let Shape::Symbol(name) = head.shape() else {
            trace!("skipping list without a symbol head");
            return;
        };

        match Head::of(name) {
            Head::Tag(name) => {
                self.write_tag(name, children);
                return;
            }
            Head::Cdata => self.write_cdata(children),
            Head::NoEscape => self.write_no_escape(children),
            Head::ListSplice => self.generate_all(children),
            Head::InlineComment => self.write_comment(children),
            Head::BlockComment => self.write_block_comment(children),
            Head::Doctype => self.write_doctype(children),
        }
        self.last_was_tag = false;
    }

    fn write_cdata<T: Tree>(&mut self, children: &[T]) {
        self.write_str("<![CDATA[");
        self.write_no_escape(children);
        self.write_str("]]>");
    }

    fn write_no_escape<T: Tree>(&mut self, children: &[T]) {
        for child in children {
            match child.shape() {
                Shape::String(text) => self.write_str(text),
                _ => trace!("skipping non-string content of an unescaped block"),
            }
        }
    }

    fn write_comment<T: Tree>(&mut self, children: &[T]) {
        self.write_str("<!--");
        for child in children {
            self.write_str(" ");
            self.write_str(&escape_comment(&comment_text(child)));
        }
        self.write_str(" -->");
    }

    fn write_block_comment<T: Tree>(&mut self, children: &[T]) {
        self.write_str("<!--");
        for child in children {
            self.write_str("\n");
            self.write_str(&escape_comment(&comment_text(child)));
        }
        self.write_str("\n-->\n");
    }

    fn write_doctype<T: Tree>(&mut self, children: &[T]) {
        self.write_str("<!DOCTYPE html>\n");
        self.generate_all(children);
    }

    fn write_tag<T: Tree>(&mut self, name: &str, mut children: &[T]) {
        if tables::is_ignorable_when_empty(name) && children.iter().all(is_empty_string) {
            trace!(tag = name, "dropping empty element");
            return;
        }

        let newline = self.newline && tables::is_newline_tag(name);
        if newline && (!self.last_was_tag || tables::is_always_break(name)) {
            self.write_str("\n");
        }

        self.write_strs(&["<", name]);
        if let Some(entries) = children.first().and_then(attribute_list) {
            for attribute in assemble(entries) {
                self.write_strs(&[" ", attribute.name]);
                if let Some(value) = attribute.html_value() {
                    self.write_strs(&["=\"", &*value, "\""]);
                }
            }
            children = &children[1..];
        }
        self.write_str(">");

        if tables::is_void(name) {
            self.last_was_tag = newline;
            return;
        }

        self.generate_all(children);
        self.write_strs(&["</", name, ">"]);
        if newline {
            self.write_str("\n");
        }
        self.last_was_tag = newline;
    }
}

fn is_empty_string<T: Tree>(node: &T) -> bool {
    matches!(node.shape(), Shape::String(""))
}

/// Text of a comment item: strings stand for themselves, anything else is
/// written as an s-expression.
fn comment_text<T: Tree>(node: &T) -> Cow<'_, str> {
    match node.shape() {
        Shape::String(text) => Cow::Borrowed(text),
        _ => Cow::Owned(sx::to_string(Shaped(node))),
    }
}

#[cfg(test)]
mod test {
    use super::Encoder;
    use std::io::{self, Write};
    use sx::from_str;

    /// A sink that accepts `limit` bytes and then fails every write.
    struct FullSink {
        limit: usize,
        buffer: Vec<u8>,
        writes_after_failure: usize,
        failed: bool,
    }

    impl FullSink {
        fn new(limit: usize) -> Self {
            Self {
                limit,
                buffer: Vec::new(),
                writes_after_failure: 0,
                failed: false,
            }
        }
    }

    impl Write for FullSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.failed {
                self.writes_after_failure += 1;
            }
            let room = self.limit - self.buffer.len();
            if room == 0 {
                self.failed = true;
                return Err(io::Error::new(io::ErrorKind::WriteZero, "sink is full"));
            }
            let len = room.min(buf.len());
            self.buffer.extend_from_slice(&buf[..len]);
            Ok(len)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_error_is_sticky() {
        let tree = from_str(r#"(div (p "first") (p "second") (@@ "note"))"#).unwrap();
        let mut sink = FullSink::new(12);

        let mut encoder = Encoder::new(&mut sink, false);
        encoder.generate(&tree);
        let err = encoder.finish().unwrap_err();

        assert_eq!(io::ErrorKind::WriteZero, err.kind());
        assert_eq!(b"<div><p>firs", sink.buffer.as_slice());
        assert_eq!(0, sink.writes_after_failure);
    }

    #[test]
    fn test_counts_written_bytes() {
        let tree = from_str(r#"(p "a&b")"#).unwrap();
        let mut buffer = Vec::new();

        let mut encoder = Encoder::new(&mut buffer, false);
        encoder.generate(&tree);
        let written = encoder.finish().unwrap();

        assert_eq!(b"<p>a&amp;b</p>", buffer.as_slice());
        assert_eq!(buffer.len(), written);
    }

    #[test]
    fn test_comment_renders_non_strings_as_sexpr() {
        let tree = from_str(r#"(@@ 17 sym (a "b--c"))"#).unwrap();
        let mut buffer = Vec::new();

        let mut encoder = Encoder::new(&mut buffer, false);
        encoder.generate(&tree);
        let written = encoder.finish().unwrap();

        let html = String::from_utf8(buffer).unwrap();
        assert_eq!(r#"<!-- 17 sym (a "b-&#45;c") -->"#, html);
        assert_eq!(html.len(), written);
    }
}
