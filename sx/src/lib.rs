//! S-expressions as a tree model for markup.
//!
//! # Syntax
//!
//! - **Lists** are sequences of values delimited by `(` and `)` and separated
//!   by whitespace. A `.` before the last element of a list makes it a dotted
//!   pair, so `(href . "x")` pairs a key with a value. A dotted tail that is
//!   itself a list is spliced in: `(a . (b c))` reads as `(a b c)`.
//!
//! - **Strings** are enclosed within double quotes. `\"`, `\\`, `\|`, `\n`,
//!   `\r`, `\t` and `\u{HEX}` are recognised escapes.
//!
//! - **Numbers** are integers (`17`, `-3`) or decimals (`1.5`, `2.0e3`).
//!
//! - **Symbols** are any other run of characters that are not whitespace,
//!   `(`, `)`, `"`, `|` or `;`. Symbols that need any of those can be written
//!   between `|` delimiters using the same escapes as strings.
//!
//! - **Comments** begin with a `;` and extend to the end of the line.
//!
//! - `()` is nil.

pub(crate) mod escape;
pub(crate) mod lexer;
pub mod printer;
pub mod reader;
mod value;

pub use printer::{to_string, to_string_pretty};
pub use reader::{from_str, from_str_all, ReadError};
pub use value::{Number, Shape, Tree, Value};
