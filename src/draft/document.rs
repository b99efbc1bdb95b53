//! In-memory model of a service draft document
//!
//! Drafts are parsed with `quick-xml` into an owned element tree, mutated
//! by the patchers and serialized back with re-indentation. Whitespace-only
//! text in an element that also holds child markup is layout and is dropped
//! on read; the writer re-creates it. All other text is kept verbatim.

use std::fs;
use std::io::Write;
use std::path::Path;

use log::debug;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

use crate::draft::constants::{INDENT_CHAR, INDENT_SIZE};
use crate::draft::errors::{DraftError, DraftResult};

/// A node in the draft tree
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// Nested element
    Element(Element),
    /// Entity-decoded text content
    Text(String),
    /// Raw CDATA section
    CData(String),
    /// Comment body
    Comment(String),
    /// Processing instruction content, target included
    ProcessingInstruction(String),
}

impl XmlNode {
    /// Whitespace-only text, which is layout between elements
    fn is_layout(&self) -> bool {
        match self {
            XmlNode::Text(t) => t.chars().all(char::is_whitespace),
            _ => false,
        }
    }
}

/// An XML element with ordered attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl Element {
    /// Create an empty element
    pub fn new(name: &str) -> Self {
        Element {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder-style text content setter
    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    /// Builder-style child appender
    pub fn with_child(mut self, child: Element) -> Self {
        self.append_child(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get an attribute value by its qualified name
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value with the same name
    pub fn set_attr(&mut self, key: &str, value: &str) {
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.attributes.push((key.to_string(), value.to_string())),
        }
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Iterate over child elements, skipping text and comments
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Mutable variant of [`Element::child_elements`]
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    /// First child element with the given name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|e| e.name == name)
    }

    /// First text (or CDATA) content of this element
    pub fn text(&self) -> Option<&str> {
        self.children.iter().find_map(|node| match node {
            XmlNode::Text(t) | XmlNode::CData(t) => Some(t.as_str()),
            _ => None,
        })
    }

    /// Replace the first text node, or append one when the element has none
    ///
    /// # Returns
    /// `true` if the content changed
    pub fn set_text(&mut self, text: &str) -> bool {
        for node in self.children.iter_mut() {
            match node {
                XmlNode::Text(t) | XmlNode::CData(t) => {
                    if t.as_str() == text {
                        return false;
                    }
                    *node = XmlNode::Text(text.to_string());
                    return true;
                }
                _ => {}
            }
        }

        self.children.push(XmlNode::Text(text.to_string()));
        true
    }

    /// Append a child element
    ///
    /// Whitespace-only text already present becomes layout and is removed.
    pub fn append_child(&mut self, child: Element) {
        self.children.retain(|node| !node.is_layout());
        self.children.push(XmlNode::Element(child));
    }

    /// Drop layout whitespace when this element holds markup children
    fn strip_layout(&mut self) {
        let has_markup = self.children.iter().any(|node| {
            matches!(node, XmlNode::Element(_) | XmlNode::Comment(_) | XmlNode::ProcessingInstruction(_))
        });
        if has_markup {
            self.children.retain(|node| !node.is_layout());
        }
    }

    /// Count of all elements in this subtree, including this one
    pub fn element_count(&self) -> usize {
        1 + self.child_elements().map(Element::element_count).sum::<usize>()
    }

    /// Build an element from a start (or empty) tag event
    fn from_start(start: &BytesStart) -> DraftResult<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut element = Element::new(&name);

        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            element.attributes.push((key, value));
        }

        Ok(element)
    }
}

/// The XML declaration of a draft
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

impl Declaration {
    fn from_event(decl: &BytesDecl) -> DraftResult<Self> {
        let version = String::from_utf8_lossy(&decl.version()?).into_owned();
        let encoding = match decl.encoding() {
            Some(value) => Some(String::from_utf8_lossy(&value?).into_owned()),
            None => None,
        };
        let standalone = match decl.standalone() {
            Some(value) => Some(String::from_utf8_lossy(&value?).into_owned()),
            None => None,
        };

        Ok(Declaration { version, encoding, standalone })
    }
}

/// A parsed service draft
#[derive(Debug, Clone, PartialEq)]
pub struct DraftDocument {
    pub declaration: Option<Declaration>,
    pub doctype: Option<String>,
    /// Comments and processing instructions preceding the root element
    pub prolog: Vec<XmlNode>,
    pub root: Element,
    /// Comments and processing instructions following the root element
    pub epilog: Vec<XmlNode>,
}

impl DraftDocument {
    /// Wrap an element tree in a document with a UTF-8 declaration
    pub fn new(root: Element) -> Self {
        DraftDocument {
            declaration: Some(Declaration {
                version: "1.0".to_string(),
                encoding: Some("utf-8".to_string()),
                standalone: None,
            }),
            doctype: None,
            prolog: Vec::new(),
            root,
            epilog: Vec::new(),
        }
    }

    /// Parse a draft from an XML string
    pub fn parse(xml: &str) -> DraftResult<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut declaration = None;
        let mut doctype = None;
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Decl(decl) => declaration = Some(Declaration::from_event(&decl)?),
                Event::DocType(text) => {
                    doctype = Some(String::from_utf8_lossy(&text).trim().to_string());
                }
                Event::Start(start) => stack.push(Element::from_start(&start)?),
                Event::Empty(start) => {
                    let element = Element::from_start(&start)?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let mut element = stack.pop().ok_or_else(|| {
                        DraftError::XmlError("Unexpected closing tag".to_string())
                    })?;
                    element.strip_layout();
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(XmlNode::Text(text.unescape()?.into_owned()));
                    }
                }
                Event::CData(data) => {
                    if let Some(parent) = stack.last_mut() {
                        let content = String::from_utf8_lossy(&data.into_inner()).into_owned();
                        parent.children.push(XmlNode::CData(content));
                    }
                }
                Event::Comment(text) => {
                    let node = XmlNode::Comment(String::from_utf8_lossy(&text).into_owned());
                    Self::place_misc(&mut stack, &root, &mut prolog, &mut epilog, node);
                }
                Event::PI(pi) => {
                    let node = XmlNode::ProcessingInstruction(String::from_utf8_lossy(&pi).into_owned());
                    Self::place_misc(&mut stack, &root, &mut prolog, &mut epilog, node);
                }
                Event::Eof => break,
                other => debug!("Skipping unsupported XML event: {:?}", other),
            }
        }

        if let Some(open) = stack.last() {
            return Err(DraftError::XmlError(format!("Unclosed element <{}>", open.name)));
        }

        let root = root.ok_or(DraftError::MissingRoot)?;

        Ok(DraftDocument { declaration, doctype, prolog, root, epilog })
    }

    /// Put a comment or processing instruction in its parent, prolog or epilog
    fn place_misc(
        stack: &mut [Element],
        root: &Option<Element>,
        prolog: &mut Vec<XmlNode>,
        epilog: &mut Vec<XmlNode>,
        node: XmlNode,
    ) {
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None if root.is_none() => prolog.push(node),
            None => epilog.push(node),
        }
    }

    /// Attach a completed element to its parent, or make it the root
    fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> DraftResult<()> {
        match stack.last_mut() {
            Some(parent) => parent.children.push(XmlNode::Element(element)),
            None if root.is_none() => *root = Some(element),
            None => {
                return Err(DraftError::XmlError(format!(
                    "Multiple root elements (found <{}>)",
                    element.name
                )))
            }
        }
        Ok(())
    }

    /// Read and parse a draft file
    pub fn load<P: AsRef<Path>>(path: P) -> DraftResult<Self> {
        let path = path.as_ref();
        debug!("Loading draft {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Serialize and overwrite the draft file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> DraftResult<()> {
        let path = path.as_ref();
        let xml = self.to_xml_string()?;
        fs::write(path, xml)?;
        debug!("Wrote draft {}", path.display());
        Ok(())
    }

    /// Serialize the document with indentation
    pub fn to_xml_string(&self) -> DraftResult<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), INDENT_CHAR, INDENT_SIZE);

        if let Some(decl) = &self.declaration {
            writer.write_event(Event::Decl(BytesDecl::new(
                &decl.version,
                decl.encoding.as_deref(),
                decl.standalone.as_deref(),
            )))?;
        }

        if let Some(doctype) = &self.doctype {
            writer.write_event(Event::DocType(BytesText::from_escaped(doctype.as_str())))?;
        }

        for node in &self.prolog {
            write_node(&mut writer, node)?;
        }

        write_element(&mut writer, &self.root)?;

        for node in &self.epilog {
            write_node(&mut writer, node)?;
        }

        let mut bytes = writer.into_inner();
        bytes.push(b'\n');
        String::from_utf8(bytes).map_err(|e| DraftError::XmlError(e.to_string()))
    }
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> DraftResult<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;

    Ok(())
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &XmlNode) -> DraftResult<()> {
    match node {
        XmlNode::Element(e) => write_element(writer, e)?,
        XmlNode::Text(t) => writer.write_event(Event::Text(BytesText::new(t)))?,
        XmlNode::CData(c) => writer.write_event(Event::CData(BytesCData::new(c.as_str())))?,
        XmlNode::Comment(c) => writer.write_event(Event::Comment(BytesText::from_escaped(c.as_str())))?,
        XmlNode::ProcessingInstruction(pi) => writer.write_event(Event::PI(BytesPI::new(pi.as_str())))?,
    }
    Ok(())
}
