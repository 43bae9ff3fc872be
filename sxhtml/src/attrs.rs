//! Attribute lists.
//!
//! An attribute list is the first child after the tag symbol when it is a
//! list of entries, either written as `((key . value) ...)` or marked as
//! `(@ (key . value) ...)`. Each entry is one of
//!
//! - `(key . value)` or `(key value)`: an attribute with a value,
//! - `(key)` or `(key . ())`: an attribute without a value (`<input checked>`),
//! - `(key ())`: a tombstone that removes `key` from the list.
//!
//! The first entry for a key wins, so a caller can override or remove
//! attributes that appear later in the list.
use sx::{Shape, Tree};
use std::borrow::Cow;
use std::collections::btree_map::{BTreeMap, Entry};

use crate::directive::ATTRIBUTE_MARKER;
use crate::escape::{escape_attribute_value, escape_url};
use crate::tables::is_url_attribute;
use crate::tracing_macros::trace;

/// How the value of an attribute is escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    Plain,
    Url,
    /// Escaped like [`AttrKind::Plain`] for now.
    Css,
    /// Escaped like [`AttrKind::Plain`] for now.
    Script,
}

impl AttrKind {
    /// Classifies an attribute by its name.
    pub fn of(name: &str) -> Self {
        let name = if let Some(data_name) = name.strip_prefix("data-") {
            data_name
        } else if let Some((prefix, rest)) = name.split_once(':') {
            if prefix == "xmlns" {
                return AttrKind::Url;
            }
            rest
        } else {
            name
        };

        if is_url_attribute(name) {
            return AttrKind::Url;
        }
        if name == "style" {
            return AttrKind::Css;
        }
        if name.starts_with("on") {
            return AttrKind::Script;
        }
        if ["url", "uri", "src", "doi"]
            .iter()
            .any(|part| name.contains(part))
        {
            return AttrKind::Url;
        }
        AttrKind::Plain
    }
}

/// An attribute that survived assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub name: &'a str,
    /// Trimmed, unescaped value. `None` for attributes without a value.
    pub value: Option<Cow<'a, str>>,
    pub kind: AttrKind,
}

impl Attribute<'_> {
    /// The value as it is written between the quotes.
    pub fn html_value(&self) -> Option<Cow<'_, str>> {
        let value = self.value.as_deref()?;
        Some(match self.kind {
            AttrKind::Url => Cow::Owned(escape_attribute_value(&escape_url(value)).into_owned()),
            AttrKind::Plain | AttrKind::Css | AttrKind::Script => escape_attribute_value(value),
        })
    }
}

/// Returns the entries of `node` if it has the shape of an attribute list.
pub fn attribute_list<T: Tree>(node: &T) -> Option<&[T]> {
    let Shape::List(items) = node.shape() else {
        return None;
    };

    match items.first()?.shape() {
        Shape::Symbol(ATTRIBUTE_MARKER) => Some(&items[1..]),
        Shape::List(_) | Shape::Pair(..) => Some(items),
        _ => None,
    }
}

/// Splits an entry into its key and its value.
///
/// The outer `Option` of the value is `None` for a missing value; the inner
/// one is `None` for a value that removes the attribute.
fn split_entry<T: Tree>(entry: &T) -> Option<(&str, Option<Option<Cow<'_, str>>>)> {
    let (key, value) = match entry.shape() {
        Shape::List(items) => {
            let (key, rest) = items.split_first()?;
            (key, rest.first())
        }
        Shape::Pair(head, tail) => match tail.shape() {
            Shape::Nil => (head, None),
            _ => (head, Some(tail)),
        },
        _ => return None,
    };

    let Shape::Symbol(key) = key.shape() else {
        return None;
    };
    if key.is_empty() {
        return None;
    }

    let value = value.map(|value| match value.shape() {
        Shape::String(value) => Some(Cow::Borrowed(value.trim())),
        Shape::Symbol(value) => Some(Cow::Borrowed(value.trim())),
        Shape::Number(number) => Some(Cow::Owned(number.to_string())),
        Shape::Nil | Shape::List(_) | Shape::Pair(..) => None,
    });

    Some((key, value))
}

/// Assembles the attributes of an attribute list, sorted by name.
pub fn assemble<T: Tree>(entries: &[T]) -> Vec<Attribute<'_>> {
    let mut attributes = BTreeMap::new();

    for entry in entries {
        let Some((name, value)) = split_entry(entry) else {
            trace!("skipping malformed attribute entry");
            continue;
        };

        let Entry::Vacant(slot) = attributes.entry(name) else {
            continue;
        };

        slot.insert(match value {
            None => Some(None),
            Some(Some(value)) => Some(Some(value)),
            Some(None) => None,
        });
    }

    attributes
        .into_iter()
        .filter_map(|(name, value)| {
            Some(Attribute {
                name,
                value: value?,
                kind: AttrKind::of(name),
            })
        })
        .collect()
}
