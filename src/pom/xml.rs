//! Minimal element tree for POM and repository metadata documents.
//!
//! Maven documents are small, so the whole tree is materialised. Elements are
//! keyed by local name (namespace prefixes are dropped), attributes are not
//! retained, and comments, processing instructions, and the doctype are
//! skipped. Text and CDATA directly inside an element are concatenated in
//! document order.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

/// Errors arising while building an element tree.
#[derive(Debug, Error)]
pub enum XmlError {
    /// The tokenizer rejected the input.
    #[error("malformed XML: {0}")]
    Syntax(#[from] quick_xml::Error),

    /// Character data could not be unescaped.
    #[error("invalid character data: {reason}")]
    Text {
        /// Description of the unescaping failure.
        reason: String,
    },

    /// The input ended while an element was still open.
    #[error("unclosed element <{name}>")]
    Unclosed {
        /// Local name of the innermost open element.
        name: String,
    },

    /// The input contained no element at all.
    #[error("document has no root element")]
    NoRoot,
}

/// An XML element with its direct text and child elements.
///
/// # Examples
///
/// ```
/// use maven_gem::pom::xml::parse_document;
///
/// let root = parse_document("<project><groupId> ant </groupId></project>")
///     .expect("well-formed XML");
/// assert_eq!(root.name(), "project");
/// assert_eq!(root.child_text("groupId"), Some("ant"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Create an empty element with the given local name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Return the element's local name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the untrimmed text content directly inside this element.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Return the trimmed text, or `None` when it is blank.
    #[must_use]
    pub fn trimmed_text(&self) -> Option<&str> {
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Return all child elements in document order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Return the child element at `index`, counting elements only.
    #[must_use]
    pub fn nth_child(&self, index: usize) -> Option<&Self> {
        self.children.get(index)
    }

    /// Return the first child element named `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Iterate over the child elements named `name`.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Return the trimmed, non-blank text of the first child named `name`.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(Self::trimmed_text)
    }

    /// Append a child element.
    pub fn push_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Append character data to this element's text.
    pub fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }
}

/// Parse an XML document into its root [`Element`].
///
/// Elements following the first root element are ignored.
///
/// # Errors
///
/// Returns [`XmlError::Syntax`] for tokenizer failures (including
/// mismatched end tags), [`XmlError::Unclosed`] when the input ends inside
/// an element, and [`XmlError::NoRoot`] for documents without elements.
pub fn parse_document(xml: &str) -> Result<Element, XmlError> {
    let mut reader = Reader::from_str(xml.trim_start_matches('\u{feff}'));
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Element::new(local_name(&start))),
            Event::Empty(start) => attach(&mut stack, &mut root, Element::new(local_name(&start))),
            Event::End(_) => {
                // The tokenizer already rejects unmatched end tags.
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element);
                }
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    let unescaped = text.unescape().map_err(|e| XmlError::Text {
                        reason: e.to_string(),
                    })?;
                    current.push_text(&unescaped);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.push_text(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::Unclosed { name: open.name });
    }
    root.ok_or(XmlError::NoRoot)
}

fn local_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.push_child(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}
