use crate::printer::{Print, Printer, Shaped};
use ordered_float::OrderedFloat;
use proptest::arbitrary::Arbitrary;
use smol_str::SmolStr;
use std::fmt::{self, Display};

/// A numeric atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Number {
    Int(i64),
    Float(OrderedFloat<f64>),
}

impl Display for Number {
    /// Writes the canonical decimal form.
    ///
    /// Floats always carry a decimal point so that they read back as floats.
    /// Magnitudes outside `1e-5..1e16` use an exponent. NaN and the
    /// infinities have no literal and are written as `NaN`, `inf` and
    /// `-inf`, which read back as symbols.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(int) => write!(f, "{}", int),
            Number::Float(float) => {
                let float = float.0;
                if !float.is_finite() {
                    return write!(f, "{}", float);
                }

                let magnitude = float.abs();
                let text = if magnitude != 0.0 && !(1e-5..1e16).contains(&magnitude) {
                    format!("{:e}", float)
                } else {
                    float.to_string()
                };

                match text.split_once('e') {
                    Some((mantissa, exponent)) if !mantissa.contains('.') => {
                        write!(f, "{}.0e{}", mantissa, exponent)
                    }
                    None if !text.contains('.') => write!(f, "{}.0", text),
                    _ => f.write_str(&text),
                }
            }
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(OrderedFloat(value))
    }
}

/// An s-expression represented as a recursive enum.
///
/// Lists follow cons semantics: a [`Value::Pair`] is a dotted pair whose tail
/// is an atom, while a pair whose tail is a list is just a longer list. Use
/// [`Value::cons`] to build pairs with that normalisation applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Nil,
    Symbol(SmolStr),
    String(SmolStr),
    Number(Number),
    List(Vec<Value>),
    Pair(Box<Value>, Box<Value>),
}

impl Value {
    pub fn symbol(name: impl Into<SmolStr>) -> Self {
        Value::Symbol(name.into())
    }

    pub fn string(value: impl Into<SmolStr>) -> Self {
        Value::String(value.into())
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    /// Prepends `head` to `tail`.
    ///
    /// Consing onto nil or a list yields a list; consing onto any other atom
    /// yields a dotted [`Value::Pair`].
    pub fn cons(head: Value, tail: Value) -> Self {
        match tail {
            Value::Nil => Value::List(vec![head]),
            Value::List(mut items) => {
                items.insert(0, head);
                Value::List(items)
            }
            tail => Value::Pair(Box::new(head), Box::new(tail)),
        }
    }

    /// Whether this is nil or the empty list.
    pub fn is_nil(&self) -> bool {
        match self {
            Value::Nil => true,
            Value::List(items) => items.is_empty(),
            _ => false,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Symbol(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value.into())
    }
}

impl From<SmolStr> for Value {
    fn from(value: SmolStr) -> Self {
        Value::String(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value.into())
    }
}

impl Print for Value {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.print(Shaped(self))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::printer::to_string(self))
    }
}

/// Read-only view of a tree node, as needed by consumers that walk a tree
/// without caring about how it is stored.
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a, T> {
    /// Nil or the empty list.
    Nil,
    Symbol(&'a str),
    String(&'a str),
    Number(Number),
    /// A non-empty list.
    List(&'a [T]),
    /// A dotted pair with an atom tail.
    Pair(&'a T, &'a T),
}

/// Trees that can be inspected through a [`Shape`].
pub trait Tree: Sized {
    fn shape(&self) -> Shape<'_, Self>;
}

impl Tree for Value {
    fn shape(&self) -> Shape<'_, Self> {
        match self {
            Value::Nil => Shape::Nil,
            Value::Symbol(name) => Shape::Symbol(name),
            Value::String(value) => Shape::String(value),
            Value::Number(number) => Shape::Number(*number),
            Value::List(items) if items.is_empty() => Shape::Nil,
            Value::List(items) => Shape::List(items),
            Value::Pair(head, tail) => Shape::Pair(head, tail),
        }
    }
}

impl Arbitrary for Value {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        use proptest::prelude::*;

        let leaf = proptest::prop_oneof![
            any::<String>().prop_map(Value::from),
            "[^\\s]{1,12}".prop_map(Value::symbol),
            any::<i64>().prop_map(Value::from),
        ];
        leaf.prop_recursive(8, 256, 10, |inner| {
            proptest::prop_oneof![
                proptest::collection::vec(inner.clone(), 1..10).prop_map(Value::List),
                (inner, any::<String>()).prop_map(|(head, tail)| Value::Pair(
                    Box::new(head),
                    Box::new(Value::from(tail))
                )),
            ]
        })
        .boxed()
    }
}

#[cfg(test)]
mod test {
    use super::{Number, Shape, Tree, Value};
    use crate::{from_str, to_string, to_string_pretty};
    use proptest::prelude::*;
    use rstest::rstest;

    proptest! {
        #[test]
        fn print_then_read(value: Value) {
            let sexp = to_string(&value);
            let read = from_str(&sexp).unwrap();
            assert_eq!(value, read);
        }

        #[test]
        fn pretty_print_then_read(value: Value, width in 0..120usize) {
            let sexp = to_string_pretty(&value, width);
            let read = from_str(&sexp).unwrap();
            assert_eq!(value, read);
        }
    }

    #[rstest]
    #[case(Number::Int(17), "17")]
    #[case(Number::Int(-3), "-3")]
    #[case(Number::from(2.0), "2.0")]
    #[case(Number::from(1.5), "1.5")]
    #[case(Number::from(1e300), "1.0e300")]
    #[case(Number::from(-2.5e-7), "-2.5e-7")]
    #[case(Number::from(0.0), "0.0")]
    #[case(Number::from(f64::NAN), "NaN")]
    fn test_number_display(#[case] number: Number, #[case] expected: &str) {
        assert_eq!(expected, number.to_string());
    }

    #[rstest]
    #[case(1e300)]
    #[case(-2.5e-7)]
    #[case(123456789.125)]
    #[case(f64::MAX)]
    #[case(f64::MIN_POSITIVE)]
    fn test_float_reads_back(#[case] float: f64) {
        let value = Value::from(float);
        assert_eq!(value, from_str(&to_string(&value)).unwrap());
    }

    #[test]
    fn test_cons_normalises() {
        let key = Value::symbol("a");
        assert_eq!(
            Value::list([key.clone()]),
            Value::cons(key.clone(), Value::Nil)
        );
        assert_eq!(
            Value::list([key.clone(), "b".into()]),
            Value::cons(key.clone(), Value::list(["b".into()]))
        );
        assert_eq!(
            Value::Pair(Box::new(key.clone()), Box::new("b".into())),
            Value::cons(key, "b".into())
        );
    }

    #[test]
    fn test_empty_list_is_nil_shape() {
        assert!(matches!(Value::List(vec![]).shape(), Shape::Nil));
        assert!(Value::List(vec![]).is_nil());
    }
}
