use std::convert::Infallible;

use crate::escape::{escape_string, escape_symbol};
use crate::value::Number;

use super::{Print, Printer};
use pretty::DocAllocator as _;

/// A pretty printer that uses the `pretty` crate to format the output.
struct PrettyPrinter<'a> {
    arena: &'a pretty::Arena<'a>,
    items: Vec<pretty::DocBuilder<'a, pretty::Arena<'a>>>,
}

impl<'a> PrettyPrinter<'a> {
    fn delimited<F>(&mut self, f: F) -> Result<(), Infallible>
    where
        F: FnOnce(&mut Self) -> Result<(), Infallible>,
    {
        let position = self.items.len();
        f(self)?;
        let items = self.items.drain(position..);

        let docs = self
            .arena
            .intersperse(items, self.arena.line())
            .nest(2)
            .group();

        self.items.push(
            self.arena
                .text("(")
                .append(docs)
                .append(self.arena.text(")")),
        );

        Ok(())
    }
}

impl<'a> Printer for PrettyPrinter<'a> {
    type Error = Infallible;

    fn symbol(&mut self, symbol: &str) -> Result<(), Self::Error> {
        let doc = self.arena.text(escape_symbol(symbol));
        self.items.push(doc);
        Ok(())
    }

    fn string(&mut self, string: &str) -> Result<(), Self::Error> {
        let doc = self.arena.text(escape_string(string));
        self.items.push(doc);
        Ok(())
    }

    fn number(&mut self, number: Number) -> Result<(), Self::Error> {
        let doc = self.arena.text(number.to_string());
        self.items.push(doc);
        Ok(())
    }

    fn list<F>(&mut self, f: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        self.delimited(f)
    }

    fn pair<H, T>(&mut self, head: H, tail: T) -> Result<(), Self::Error>
    where
        H: FnOnce(&mut Self) -> Result<(), Self::Error>,
        T: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        self.delimited(|printer| {
            head(printer)?;
            let dot = printer.arena.text(".");
            printer.items.push(dot);
            tail(printer)
        })
    }
}

/// Pretty print a `T` into an s-expression string, breaking lines to fit `width`.
pub fn to_string_pretty<T: Print>(value: T, width: usize) -> String {
    let arena = pretty::Arena::new();
    let mut printer = PrettyPrinter {
        items: vec![],
        arena: &arena,
    };

    let _ = value.print(&mut printer);

    let double_line = arena.line().append(arena.line());
    let doc = arena.intersperse(printer.items, double_line);

    let mut string = String::new();
    let _ = doc.render_fmt(width, &mut string);
    string
}
