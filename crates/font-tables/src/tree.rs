//! A small element tree matching the shape of TTX documents.

use std::fmt::{self, Write};

use indexmap::IndexMap;

/// Attribute holding a field's value in TTX documents.
pub const VALUE_ATTR: &str = "value";

/// An XML element with ordered attributes and element children.
///
/// Text content is not modelled; TTX stores the fields of the tables handled
/// here entirely in attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: IndexMap<String, String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// A field element of the form `<name value="..."/>`.
    pub fn with_value(name: impl Into<String>, value: impl ToString) -> Self {
        let mut element = Self::new(name);
        element.set_value(value);
        element
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl ToString) {
        self.attributes.insert(key.into(), value.to_string());
    }

    pub fn value(&self) -> Option<&str> {
        self.attribute(VALUE_ATTR)
    }

    pub fn set_value(&mut self, value: impl ToString) {
        self.set_attribute(VALUE_ATTR, value);
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// First direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Depth-first iteration over this element and all its descendants.
    pub fn iter(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Iterate over every element named `name`, at any depth.
    pub fn iter_named<'a, 'b>(
        &'a self,
        name: &'b str,
    ) -> impl Iterator<Item = &'a Element> + use<'a, 'b> {
        self.iter().filter(move |e| e.name == name)
    }

    /// Call `f` on every element named `name`, at any depth, including self.
    ///
    /// Returns the number of elements visited.
    pub fn for_each_named_mut(&mut self, name: &str, f: &mut impl FnMut(&mut Element)) -> usize {
        let mut count = 0;
        if self.name == name {
            f(self);
            count += 1;
        }
        for child in &mut self.children {
            count += child.for_each_named_mut(name, f);
        }
        count
    }

    /// Set the `value` attribute of every element named `name`.
    pub fn set_value_all(&mut self, name: &str, value: impl ToString) -> usize {
        let value = value.to_string();
        self.for_each_named_mut(name, &mut |e| e.set_value(&value))
    }

    /// Serialize this element and its children, indenting by two spaces per level.
    pub fn write_xml(&self, out: &mut impl Write, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        write!(out, "{indent}<{}", self.name)?;
        for (key, value) in &self.attributes {
            write!(out, " {key}=\"{}\"", escape(value))?;
        }
        if self.children.is_empty() {
            return writeln!(out, "/>");
        }
        writeln!(out, ">")?;
        for child in &self.children {
            child.write_xml(out, depth + 1)?;
        }
        writeln!(out, "{indent}</{}>", self.name)
    }
}

/// Depth-first iterator returned by [`Element::iter`].
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
