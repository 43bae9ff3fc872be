use crate::escape::{escape_string, escape_symbol};
use crate::value::Number;
use std::convert::Infallible;
use std::fmt::Write as _;

use super::{Print, Printer};

/// A printer that formats the output as a single-line string.
struct SimplePrinter {
    needs_whitespace: bool,
    string: String,
}

impl SimplePrinter {
    pub fn new() -> Self {
        Self {
            needs_whitespace: false,
            string: String::new(),
        }
    }

    #[inline]
    fn space(&mut self) {
        if self.needs_whitespace {
            self.string.push(' ');
        }
    }
}

impl Printer for SimplePrinter {
    type Error = Infallible;

    fn symbol(&mut self, symbol: &str) -> Result<(), Self::Error> {
        self.space();
        self.needs_whitespace = true;
        self.string.push_str(&escape_symbol(symbol));
        Ok(())
    }

    fn string(&mut self, string: &str) -> Result<(), Self::Error> {
        self.space();
        self.needs_whitespace = true;
        self.string.push_str(&escape_string(string));
        Ok(())
    }

    fn number(&mut self, number: Number) -> Result<(), Self::Error> {
        self.space();
        self.needs_whitespace = true;
        let _ = write!(&mut self.string, "{}", number);
        Ok(())
    }

    fn list<F>(&mut self, f: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        self.space();
        self.string.push('(');
        self.needs_whitespace = false;
        f(self)?;
        self.string.push(')');
        self.needs_whitespace = true;
        Ok(())
    }

    fn pair<H, T>(&mut self, head: H, tail: T) -> Result<(), Self::Error>
    where
        H: FnOnce(&mut Self) -> Result<(), Self::Error>,
        T: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        self.list(|printer| {
            head(printer)?;
            printer.string.push_str(" .");
            tail(printer)
        })
    }
}

/// Print a `T` into an s-expression string.
///
/// This function does not produce any line breaks, indentation, or unnecessary whitespace.
/// Where human readability is a concern, consider using the [`to_string_pretty`] function instead.
///
/// [`to_string_pretty`]: `crate::printer::to_string_pretty`
pub fn to_string<T: Print>(value: T) -> String {
    let mut printer = SimplePrinter::new();
    let _ = value.print(&mut printer);
    printer.string
}
