use logos::Logos;

use crate::{
    escape::unescape,
    reader::{ReadBuffer, Span, Token},
    value::Number,
};

#[derive(Debug, Clone, PartialEq, Logos)]
#[logos(skip r"([ \t\r\n\f]+|;[^\n]*)+")]
pub(crate) enum LexerToken {
    #[token("(")]
    OpenList,
    #[token(")")]
    CloseList,
    #[token(".", priority = 3)]
    Dot,
    #[regex(r"-?[0-9]+", priority = 3)]
    Int,
    #[regex(r"-?[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", priority = 3)]
    Float,
    #[regex(r#"[^ \t\r\n\f\(\)"|\;\\]+"#)]
    BareSymbol,
    #[regex(r#"\|([^|\\]|\\["\\|nrt]|\\u\{[a-fA-F0-9]+\})*\|"#)]
    EscapedSymbol,
    #[regex(r#""([^"\\]|\\["\\|nrt]|\\u\{[a-fA-F0-9]+\})*""#)]
    EscapedString,
}

#[derive(Debug, thiserror::Error)]
pub enum LexError {
    #[error("unexpected end of input")]
    Eof(Span),
    #[error("unexpected )")]
    UnexpectedClose(Span),
    #[error("syntax error")]
    Syntax(Span),
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::Eof(span) => span.clone(),
            LexError::UnexpectedClose(span) => span.clone(),
            LexError::Syntax(span) => span.clone(),
        }
    }
}

/// Strips the delimiters of a quoted token and resolves its escapes.
fn unquote(slice: &str, span: &Span) -> Result<String, LexError> {
    let inner = &slice[1..slice.len() - 1];
    unescape(inner).ok_or(LexError::Syntax(span.clone()))
}

pub fn lex(str: &str) -> Result<ReadBuffer<'_>, LexError> {
    let mut lexer = LexerToken::lexer(str);
    let mut tokens = Vec::new();
    let mut spans = Vec::new();
    let mut open_stack = Vec::new();

    while let Some(token) = lexer.next() {
        let span = lexer.span();
        let token = token.map_err(|()| LexError::Syntax(span.clone()))?;

        match token {
            LexerToken::OpenList => {
                open_stack.push(tokens.len());
                tokens.push(Token::List(usize::MAX));
                spans.push(span);
            }
            LexerToken::CloseList => {
                let Some(pos) = open_stack.pop() else {
                    return Err(LexError::UnexpectedClose(span));
                };

                tokens[pos] = Token::List(tokens.len() - pos - 1);
                spans[pos].end = span.end;
            }
            LexerToken::Dot => {
                tokens.push(Token::Dot);
                spans.push(span);
            }
            LexerToken::Int => {
                let int = lexer
                    .slice()
                    .parse::<i64>()
                    .map_err(|_| LexError::Syntax(span.clone()))?;
                tokens.push(Token::Number(Number::Int(int)));
                spans.push(span);
            }
            LexerToken::Float => {
                let float = lexer
                    .slice()
                    .parse::<f64>()
                    .map_err(|_| LexError::Syntax(span.clone()))?;
                tokens.push(Token::Number(Number::from(float)));
                spans.push(span);
            }
            LexerToken::BareSymbol => {
                tokens.push(Token::Symbol(lexer.slice().into()));
                spans.push(span);
            }
            LexerToken::EscapedSymbol => {
                let symbol = unquote(lexer.slice(), &span)?;
                tokens.push(Token::Symbol(symbol.into()));
                spans.push(span);
            }
            LexerToken::EscapedString => {
                let string = unquote(lexer.slice(), &span)?;
                tokens.push(Token::String(string.into()));
                spans.push(span);
            }
        }
    }

    if !open_stack.is_empty() {
        return Err(LexError::Eof(str.len()..str.len()));
    }

    Ok(ReadBuffer {
        source: str,
        tokens,
        spans,
    })
}
