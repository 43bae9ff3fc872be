//! Read values from s-expression text.
use crate::lexer::lex;
use crate::value::{Number, Value};
use delegate::delegate;
use smol_str::SmolStr;
use std::fmt::Display;
use std::ops::Range;

#[derive(Debug, Clone)]
pub(crate) enum Token {
    List(usize),
    Dot,
    Symbol(SmolStr),
    String(SmolStr),
    Number(Number),
}

/// A lexed representation of an s-expression string that can be read.
#[derive(Debug, Clone)]
pub struct ReadBuffer<'a> {
    pub(crate) source: &'a str,
    pub(crate) tokens: Vec<Token>,
    pub(crate) spans: Vec<Span>,
}

impl<'a> ReadBuffer<'a> {
    pub fn new(str: &'a str) -> Result<Self> {
        lex(str).map_err(|err| ReadError::new(&err, err.span()))
    }

    #[inline]
    pub fn cursor(&'a self) -> Cursor<'a> {
        Cursor {
            buffer: self,
            index: 0,
            end_index: self.tokens.len(),
            parent: None,
        }
    }

    #[inline]
    pub fn reader(&'a self) -> Reader<'a> {
        Reader::new(self.cursor())
    }
}

/// A reader that is stepping through a [`ReadBuffer`].
#[derive(Clone)]
pub struct Reader<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Reader<'a> {
    #[inline]
    pub fn new(cursor: Cursor<'a>) -> Self {
        Self { cursor }
    }

    /// Reads the next value.
    pub fn value(&mut self) -> Result<Value> {
        if let Some((inner, after)) = self.cursor.list() {
            self.cursor = inner;
            let value = self.list_contents()?;
            self.cursor = after;
            return Ok(value);
        }

        self.step(|cursor| {
            cursor
                .atom()
                .ok_or_else(|| cursor.error("expected value"))
        })
    }

    /// Reads the remaining values of the current list, resolving a dotted tail.
    fn list_contents(&mut self) -> Result<Value> {
        let mut items = Vec::new();

        while !self.is_empty() {
            if let Some(after) = self.cursor.dot() {
                if items.is_empty() {
                    return Err(self.error("expected value before ."));
                }

                self.cursor = after;
                let tail = self.value()?;

                if !self.is_empty() {
                    return Err(self.error("expected end of list after dotted tail"));
                }

                return match tail {
                    Value::Nil => Ok(Value::List(items)),
                    Value::List(rest) => {
                        items.extend(rest);
                        Ok(Value::List(items))
                    }
                    Value::Pair(..) => Err(self.error("nested dotted pairs are not supported")),
                    tail => match items.pop() {
                        Some(head) if items.is_empty() => {
                            Ok(Value::Pair(Box::new(head), Box::new(tail)))
                        }
                        _ => Err(self.error("dotted atom tail needs exactly one head value")),
                    },
                };
            }

            items.push(self.value()?);
        }

        if items.is_empty() {
            Ok(Value::Nil)
        } else {
            Ok(Value::List(items))
        }
    }

    #[inline]
    pub fn step<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(Cursor<'a>) -> Result<(T, Cursor<'a>)>,
    {
        let (result, cursor) = f(self.cursor)?;
        self.cursor = cursor;
        Ok(result)
    }

    #[inline]
    pub fn cursor(&self) -> Cursor<'a> {
        self.cursor
    }

    delegate! {
        to self.cursor {
            pub fn is_empty(&self) -> bool;
            pub fn span(&self) -> Span;
            pub fn parent_span(&self) -> Span;
            pub fn error(&self, message: impl Display) -> ReadError;
        }
    }
}

/// A position into a [`ReadBuffer`].
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    buffer: &'a ReadBuffer<'a>,
    index: usize,
    end_index: usize,
    parent: Option<usize>,
}

impl<'a> Cursor<'a> {
    pub fn error(self, message: impl Display) -> ReadError {
        ReadError::new(message, self.span())
    }

    fn advance(self, size: usize) -> Self {
        Self {
            buffer: self.buffer,
            index: self.index + size,
            end_index: self.end_index,
            parent: self.parent,
        }
    }

    /// Reads a symbol, string or number.
    pub fn atom(self) -> Option<(Value, Self)> {
        let value = match self.get()? {
            Token::Symbol(symbol) => Value::Symbol(symbol.clone()),
            Token::String(string) => Value::String(string.clone()),
            Token::Number(number) => Value::Number(*number),
            Token::List(_) | Token::Dot => return None,
        };
        Some((value, self.advance(1)))
    }

    pub fn dot(self) -> Option<Self> {
        match self.get()? {
            Token::Dot => Some(self.advance(1)),
            _ => None,
        }
    }

    pub fn list(self) -> Option<(Self, Self)> {
        match self.get()? {
            Token::List(size) => Some(self.split(1, *size)),
            _ => None,
        }
    }

    fn split(self, skip: usize, size: usize) -> (Self, Self) {
        let left = Cursor {
            buffer: self.buffer,
            index: self.index + skip,
            end_index: self.index + size + skip,
            parent: Some(self.index),
        };

        let right = Cursor {
            buffer: self.buffer,
            index: self.index + skip + size,
            end_index: self.end_index,
            parent: self.parent,
        };

        (left, right)
    }

    pub fn is_empty(&self) -> bool {
        self.index >= self.end_index
    }

    #[inline]
    fn get(&self) -> Option<&'a Token> {
        if self.is_empty() {
            None
        } else {
            Some(&self.buffer.tokens[self.index])
        }
    }

    #[inline]
    pub fn span(&self) -> Span {
        if self.is_empty() {
            let offset = self.parent_span().end;
            offset..offset
        } else {
            self.buffer.spans[self.index].clone()
        }
    }

    #[inline]
    pub fn parent_span(&self) -> Span {
        match self.parent {
            Some(parent) => self.buffer.spans[parent].clone(),
            None => 0..self.buffer.source.len(),
        }
    }
}

/// A read error.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ReadError {
    message: String,
    span: Span,
}

impl ReadError {
    pub fn new(message: impl Display, span: Span) -> Self {
        ReadError {
            message: message.to_string(),
            span,
        }
    }

    pub fn span(&self) -> Span {
        self.span.clone()
    }
}

/// Shorthand for a result specialised to read errors.
pub type Result<T, E = ReadError> = std::result::Result<T, E>;

/// Span within a string.
pub type Span = Range<usize>;

/// Read exactly one value from an s-expression string.
pub fn from_str(source: &str) -> Result<Value> {
    let buffer = ReadBuffer::new(source)?;
    let mut reader = buffer.reader();
    let value = reader.value()?;

    if !reader.is_empty() {
        return Err(reader.error("expected end of input"));
    }

    Ok(value)
}

/// Read all values from an s-expression string.
pub fn from_str_all(source: &str) -> Result<Vec<Value>> {
    let buffer = ReadBuffer::new(source)?;
    let mut reader = buffer.reader();
    let mut values = Vec::new();

    while !reader.is_empty() {
        values.push(reader.value()?);
    }

    Ok(values)
}

#[cfg(test)]
mod test {
    use super::{from_str, from_str_all};
    use crate::value::{Number, Value};
    use rstest::rstest;

    fn sym(name: &str) -> Value {
        Value::symbol(name)
    }

    #[test]
    fn test_read_nested() {
        let value = from_str(r#"(p (b "bold") "text")"#).unwrap();
        assert_eq!(
            Value::list([
                sym("p"),
                Value::list([sym("b"), "bold".into()]),
                "text".into()
            ]),
            value
        );
    }

    #[rstest]
    #[case("(a . b)", Value::Pair(Box::new(sym("a")), Box::new(sym("b"))))]
    #[case("(a . ())", Value::list([sym("a")]))]
    #[case("(a . (b c))", Value::list([sym("a"), sym("b"), sym("c")]))]
    #[case("(a . 7)", Value::Pair(Box::new(sym("a")), Box::new(7.into())))]
    #[case("()", Value::Nil)]
    #[case("1.5", Value::Number(Number::from(1.5)))]
    #[case("|17|", sym("17"))]
    fn test_read_forms(#[case] source: &str, #[case] expected: Value) {
        assert_eq!(expected, from_str(source).unwrap());
    }

    #[rstest]
    #[case("")]
    #[case("(. a)")]
    #[case("(a . b c)")]
    #[case("(a b . c)")]
    #[case("(a . )")]
    #[case("a b")]
    #[case(r#""unterminated"#)]
    fn test_read_errors(#[case] source: &str) {
        assert!(from_str(source).is_err());
    }

    #[test]
    fn test_read_all() {
        let values = from_str_all("(br) \"/\" ; trailing comment\n(br)").unwrap();
        assert_eq!(3, values.len());
        assert_eq!(Value::string("/"), values[1]);
    }

    #[test]
    fn test_error_span() {
        let err = from_str("(a . b c)").unwrap_err();
        assert_eq!(7..8, err.span());
    }
}
