// XML serialization of element trees

use super::element::Element;
use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use std::fmt::Write as _;

/// Math namespace URI bound to the `m:` prefix
pub const MATH_NAMESPACE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/math";
/// WordprocessingML namespace URI bound to the `w:` prefix
pub const WORD_NAMESPACE: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

// Built once, shared by every writer
static TEXT_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">"])
        .expect("Failed to build XML text escaper")
});

static ATTR_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\""])
        .expect("Failed to build XML attribute escaper")
});

/// Serialization options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Declare `xmlns:m` and `xmlns:w` on the root element
    pub declare_namespaces: bool,
}

impl WriteOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_namespaces(mut self, declare: bool) -> Self {
        self.declare_namespaces = declare;
        self
    }
}

/// Escape character data.
#[inline]
pub fn escape_text(s: &str) -> String {
    TEXT_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;"])
}

/// Escape an attribute value for a double-quoted attribute.
#[inline]
pub fn escape_attr(s: &str) -> String {
    ATTR_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;"])
}

/// Render an element tree as compact XML.
///
/// Tag and attribute names are written verbatim. Elements without children
/// and text are self-closing.
///
/// # Examples
///
/// ```rust
/// use latex_omml::formula::omml::{Element, WriteOptions, to_xml};
///
/// let t = Element::new("m:t").with_text("a<b");
/// assert_eq!(to_xml(&t, &WriteOptions::default()), "<m:t>a&lt;b</m:t>");
/// ```
pub fn to_xml(element: &Element, options: &WriteOptions) -> String {
    let mut out = String::with_capacity(256);
    write_element(&mut out, element, options.declare_namespaces);
    out
}

fn write_element(out: &mut String, element: &Element, root_namespaces: bool) {
    out.push('<');
    out.push_str(element.tag());

    if root_namespaces {
        // Writing to a String cannot fail
        let _ = write!(out, " xmlns:m=\"{MATH_NAMESPACE}\" xmlns:w=\"{WORD_NAMESPACE}\"");
    }
    for (name, value) in element.attributes() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }

    if element.is_leaf() {
        out.push_str("/>");
        return;
    }
    out.push('>');

    if let Some(text) = element.text() {
        out.push_str(&escape_text(text));
    }
    for child in element.children() {
        write_element(out, child, false);
    }

    out.push_str("</");
    out.push_str(element.tag());
    out.push('>');
}
