//
//  obs-api
//  api/xml.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # XML Element Tree
//!
//! A small owned element tree used as the intermediate form between wire
//! bytes and typed entities. Parsing and writing are done with `quick-xml`;
//! the mapping between elements and entity fields lives in [`super::schema`].
//!
//! Only what the OBS API uses is modelled: element names, attributes,
//! concatenated text content and child elements. Comments, processing
//! instructions and the XML declaration are skipped on input.
//!
//! Elements are always written with an explicit end tag (`<a></a>`), never
//! in the self-closing form.

use std::io::Write;
use std::str;

use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

/// Errors raised while reading or writing XML documents.
#[derive(Error, Debug)]
pub enum XmlError {
    /// The document is not well-formed.
    #[error("{0}")]
    Syntax(#[from] quick_xml::Error),

    /// An attribute could not be parsed.
    #[error("invalid attribute: {0}")]
    Attribute(#[from] AttrError),

    /// The document or one of its names is not valid UTF-8.
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] str::Utf8Error),

    /// The input ended before any element was found.
    #[error("unexpected EOF: no root element")]
    NoRootElement,

    /// The input ended while an element was still open.
    #[error("unexpected EOF inside <{0}>")]
    UnclosedElement(String),

    /// The root element is not the one the destination type expects.
    #[error("expected element type <{expected}> but have <{found}>")]
    UnexpectedElement {
        /// Element name required by the destination type
        expected: &'static str,
        /// Element name found in the document
        found: String,
    },

    /// Writing the document failed.
    #[error("failed to write XML: {0}")]
    Write(String),
}

/// An owned XML element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// The element name, including any namespace prefix.
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Unescaped text content, kept verbatim. Whitespace-only text of an
    /// element that has children is dropped as indentation.
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<Element>,
}

impl Element {
    /// Creates an element with no attributes, text or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Adds an attribute and returns the element.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Sets the text content and returns the element.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Appends a child element and returns the element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the value of the named attribute, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the first child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Iterates over all children with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Parses the first root element of a document.
    ///
    /// Anything after the root element is ignored, as is character data
    /// outside of it.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError`] when the input is not UTF-8, not well-formed, or
    /// contains no element at all.
    pub fn parse(input: &[u8]) -> Result<Self, XmlError> {
        let document = str::from_utf8(input)?;
        let mut reader = Reader::from_str(document);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<Element> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => stack.push(Self::from_start(e)?),
                Event::Empty(ref e) => {
                    let element = Self::from_start(e)?;
                    if let Some(root) = attach(&mut stack, element) {
                        return Ok(root);
                    }
                }
                Event::End(_) => {
                    // End names are checked by the reader, so this is the
                    // innermost open element.
                    if let Some(mut element) = stack.pop() {
                        if !element.children.is_empty() && element.text.trim().is_empty() {
                            element.text.clear();
                        }
                        if let Some(root) = attach(&mut stack, element) {
                            return Ok(root);
                        }
                    }
                }
                Event::Text(ref e) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&e.unescape()?);
                    }
                }
                Event::CData(e) => {
                    if let Some(current) = stack.last_mut() {
                        let data = e.into_inner();
                        current.text.push_str(str::from_utf8(&data)?);
                    }
                }
                Event::Eof => {
                    return Err(match stack.pop() {
                        Some(open) => XmlError::UnclosedElement(open.name),
                        None => XmlError::NoRootElement,
                    });
                }
                _ => {}
            }
        }
    }

    /// Serializes the element and its descendants without an XML declaration.
    pub fn to_bytes(&self) -> Result<Vec<u8>, XmlError> {
        let mut writer = Writer::new(Vec::new());
        self.write_to(&mut writer)?;
        Ok(writer.into_inner())
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let name_bytes = start.name();
        let name = str::from_utf8(name_bytes.as_ref())?.to_string();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = str::from_utf8(attr.key.as_ref())?.to_string();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            ..Default::default()
        })
    }

    fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), XmlError> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        writer.write_event(Event::Start(start)).map_err(write_error)?;

        if !self.text.is_empty() {
            writer
                .write_event(Event::Text(BytesText::new(&self.text)))
                .map_err(write_error)?;
        }

        for child in &self.children {
            child.write_to(writer)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(write_error)
    }
}

/// Attaches a closed element to its parent, or hands it back when it is the root.
fn attach(stack: &mut [Element], element: Element) -> Option<Element> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            None
        }
        None => Some(element),
    }
}

fn write_error(e: impl std::fmt::Display) -> XmlError {
    XmlError::Write(e.to_string())
}
