//! Generic element tree used for emitted markup.

use super::elements::ElementType;
use smallvec::SmallVec;

/// Attribute list of an element; most elements carry at most a few.
pub type Attributes = SmallVec<[(String, String); 4]>;

/// A node of the output markup tree.
///
/// Tag and attribute names are logical prefixed names such as `m:oMath` or
/// `w:ascii`. Namespace declarations are left to the serializer.
///
/// # Examples
///
/// ```rust
/// use latex_omml::formula::omml::Element;
///
/// let run = Element::new("m:r").with_child(Element::new("m:t").with_text("x"));
/// assert_eq!(run.find("m:t").and_then(Element::text), Some("x"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    tag: String,
    attributes: Attributes,
    children: Vec<Element>,
    text: Option<String>,
}

impl Element {
    /// Create an element without attributes, children or text
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Create an element from its kind
    #[inline]
    pub fn of(kind: ElementType) -> Self {
        Self::new(kind.as_tag())
    }

    /// Set an attribute, replacing an existing value with the same name.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Add a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Add several child elements.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Set the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    #[inline]
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Value of the named attribute
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    #[inline]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Direct children with the given tag
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// First direct child with the given tag
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Follow a path of child tags, e.g. `["m:mPr", "m:mcs"]`
    pub fn find_path(&self, path: &[&str]) -> Option<&Element> {
        path.iter().try_fold(self, |node, tag| node.find(tag))
    }

    /// All descendants (excluding self) with the given tag, in document order
    pub fn descendants_named<'a>(&'a self, tag: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_named(tag, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.tag == tag {
                found.push(child);
            }
            child.collect_named(tag, found);
        }
    }

    /// Concatenated text of every descendant in document order
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.append_text(&mut out);
        out
    }

    fn append_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.append_text(out);
        }
    }

    /// Whether the element has neither children nor text
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && self.text.is_none()
    }
}
