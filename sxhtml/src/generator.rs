//! Entry points for rendering trees as HTML.
use std::io::{self, Write};

use sx::Tree;

use crate::encoder::Encoder;

/// An error while rendering HTML.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to write HTML output: {0}")]
    Io(#[from] io::Error),
}

/// Shorthand for a result specialised to render errors.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Renders trees as HTML.
///
/// A generator only carries configuration, so it can be copied freely and
/// shared between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generator {
    newline: bool,
}

impl Generator {
    /// Create a generator that writes everything on as few lines as possible.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert line breaks around structural elements such as `head`, `div` or `li`.
    pub fn with_newline(mut self, newline: bool) -> Self {
        self.newline = newline;
        self
    }

    pub fn newline(&self) -> bool {
        self.newline
    }

    /// Write the HTML for `tree` into `sink`.
    ///
    /// Returns the number of bytes written. When the sink fails, nothing
    /// more is written and the first error is returned.
    pub fn write_html<W: Write, T: Tree>(&self, sink: W, tree: &T) -> Result<usize> {
        let mut encoder = Encoder::new(sink, self.newline);
        encoder.generate(tree);
        Ok(encoder.finish()?)
    }

    /// Write the HTML for each of `trees` into `sink`, one after the other.
    pub fn write_list_html<W: Write, T: Tree>(&self, sink: W, trees: &[T]) -> Result<usize> {
        let mut encoder = Encoder::new(sink, self.newline);
        for tree in trees {
            encoder.generate(tree);
        }
        Ok(encoder.finish()?)
    }

    /// Render `tree` into a string.
    pub fn to_html<T: Tree>(&self, tree: &T) -> String {
        let mut buffer = Vec::new();
        // Writing into a `Vec` does not fail.
        self.write_html(&mut buffer, tree).ok();
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Render each of `trees` into a single string.
    pub fn to_html_list<T: Tree>(&self, trees: &[T]) -> String {
        let mut buffer = Vec::new();
        // Writing into a `Vec` does not fail.
        self.write_list_html(&mut buffer, trees).ok();
        String::from_utf8_lossy(&buffer).into_owned()
    }
}
