//! A small closed element tree built from `quick-xml` events.
//!
//! Only elements and their text content are kept. Attributes, comments,
//! processing instructions and text outside any element are dropped.

use std::fmt::{Display, Formatter};

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use rsaio::ExtractOptions;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Element holding a single text child.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            children: vec![Node::Text(text.into())],
        }
    }

    /// Qualified name as written in the document, e.g. `ds:Modulus`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        self.name
            .rsplit_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Appends text, merging with a directly preceding text child.
    fn push_text(&mut self, text: &str) {
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(Node::Text(text.to_string()));
        }
    }

    pub fn child_elements(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// First child element with the given local name.
    pub fn find_child(&self, local_name: &str) -> Option<&Element> {
        self.child_elements()
            .find(|child| child.local_name() == local_name)
    }

    /// The text of an element whose only child is a text node.
    pub fn single_text(&self) -> Option<&str> {
        match self.children.as_slice() {
            [Node::Text(text)] => Some(text.as_str()),
            _ => None,
        }
    }

    fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new(self.name.as_str())))?;
        for child in &self.children {
            match child {
                Node::Element(element) => element.write_to(writer)?,
                Node::Text(text) => {
                    writer.write_event(Event::Text(BytesText::new(text)))?;
                }
            }
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }

    /// Serializes the element with two-space indentation.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        self.write_to(&mut writer)?;
        let bytes = writer.into_inner();
        Ok(std::str::from_utf8(&bytes)?.to_string())
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = self.to_xml_string().map_err(|_| std::fmt::Error)?;
        write!(f, "{}", text)
    }
}

fn element_name(raw: &[u8]) -> Result<String> {
    Ok(std::str::from_utf8(raw)?.to_string())
}

/// Parses every top-level element in `text`.
///
/// The tree is built without recursion; elements nested deeper than
/// `options.max_depth` (top-level elements are at depth 0) fail with
/// [`rsaio::Error::DepthLimitExceeded`].
pub fn parse_elements(text: &str, options: &ExtractOptions) -> Result<Vec<Element>> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut roots = Vec::new();
    let mut open: Vec<Element> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                if open.len() > options.max_depth {
                    return Err(rsaio::Error::DepthLimitExceeded(options.max_depth).into());
                }
                open.push(Element::new(element_name(e.name().as_ref())?));
            }
            Event::Empty(ref e) => {
                if open.len() > options.max_depth {
                    return Err(rsaio::Error::DepthLimitExceeded(options.max_depth).into());
                }
                let element = Element::new(element_name(e.name().as_ref())?);
                attach(&mut open, &mut roots, element);
            }
            Event::End(ref e) => {
                let Some(element) = open.pop() else {
                    return Err(Error::UnexpectedEnd(element_name(e.name().as_ref())?));
                };
                attach(&mut open, &mut roots, element);
            }
            Event::Text(ref e) => {
                let text = e.unescape()?;
                match open.last_mut() {
                    Some(parent) => parent.push_text(&text),
                    None => tracing::trace!("ignoring text outside of elements"),
                }
            }
            Event::CData(e) => {
                let bytes = e.into_inner();
                let text = std::str::from_utf8(&bytes)?;
                if let Some(parent) = open.last_mut() {
                    parent.push_text(text);
                }
            }
            Event::Eof => break,
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
        buf.clear();
    }

    if let Some(element) = open.pop() {
        return Err(Error::UnclosedElement(element.name));
    }
    Ok(roots)
}

fn attach(open: &mut [Element], roots: &mut Vec<Element>, element: Element) {
    match open.last_mut() {
        Some(parent) => parent.push(Node::Element(element)),
        None => roots.push(element),
    }
}
