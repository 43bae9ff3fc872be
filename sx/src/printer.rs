//! Print values into s-expressions.
use crate::value::{Number, Shape, Tree};
mod pretty;
mod simple;
pub use pretty::to_string_pretty;
pub use simple::to_string;

/// Trait for types that can print s-expressions.
pub trait Printer: Sized {
    type Error;

    /// Print a symbol.
    fn symbol(&mut self, symbol: &str) -> Result<(), Self::Error>;

    /// Print a string.
    fn string(&mut self, string: &str) -> Result<(), Self::Error>;

    /// Print a number.
    fn number(&mut self, number: Number) -> Result<(), Self::Error>;

    /// Print a list given a function that prints the contents.
    fn list<F>(&mut self, f: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>;

    /// Print a dotted pair given functions that print the head and the tail.
    fn pair<H, T>(&mut self, head: H, tail: T) -> Result<(), Self::Error>
    where
        H: FnOnce(&mut Self) -> Result<(), Self::Error>,
        T: FnOnce(&mut Self) -> Result<(), Self::Error>;

    /// Print a printable value.
    fn print(&mut self, value: impl Print) -> Result<(), Self::Error> {
        value.print(self)
    }
}

/// Trait for types that can be printed as an s-expression.
pub trait Print {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error>;
}

impl<T: Print + Sized> Print for &T {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        (*self).print(printer)
    }
}

/// Prints any [`Tree`] through its [`Shape`].
pub struct Shaped<'a, T>(pub &'a T);

impl<T: Tree> Print for Shaped<'_, T> {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        match self.0.shape() {
            Shape::Nil => printer.list(|_| Ok(())),
            Shape::Symbol(name) => printer.symbol(name),
            Shape::String(value) => printer.string(value),
            Shape::Number(number) => printer.number(number),
            Shape::List(items) => printer.list(|printer| {
                for item in items {
                    printer.print(Shaped(item))?;
                }
                Ok(())
            }),
            Shape::Pair(head, tail) => printer.pair(
                |printer| printer.print(Shaped(head)),
                |printer| printer.print(Shaped(tail)),
            ),
        }
    }
}
