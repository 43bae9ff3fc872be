//! Renders s-expression trees as HTML.
//!
//! A list whose head is a symbol is an element: `(p "text")` renders as
//! `<p>text</p>`. The first child may be an attribute list, either
//! `(@ (key . "value") ...)` or `((key . "value") ...)`. Strings and numbers
//! are text and are escaped. A few symbols starting with `@` are directives
//! rather than tags; see [`directive`].
//!
//! ```
//! use sxhtml::Generator;
//!
//! let tree = sx::from_str(r#"(a (@ (href . "/a b")) "Tom & Jerry")"#).unwrap();
//! let html = Generator::new().to_html(&tree);
//! assert_eq!(r#"<a href="/a%20b">Tom &amp; Jerry</a>"#, html);
//! ```
//!
//! Any type that implements [`sx::Tree`] can be rendered, not only
//! [`sx::Value`]. Documents held as a [`dom::Node`] are turned into trees
//! with [`to_sx`].
//!
//! # Features
//!
//! - `tracing`: log skipped nodes and output errors through `tracing`.

mod tracing_macros;

pub mod attrs;
pub mod convert;
pub mod directive;
pub mod dom;
mod encoder;
pub mod escape;
mod generator;
pub mod tables;

pub use attrs::AttrKind;
pub use convert::{to_sx, ConvertError};
pub use generator::{Error, Generator, Result};
