//
//  obs-api
//  api/common/reference.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Named-entity references.
//!
//! A reference points at another entity by its identifying string: a user by
//! login, a project by name. On the wire it is an element with no content and
//! a single attribute:
//!
//! ```text
//! <maintainer userid="alice"></maintainer>
//! <project name="home:alice"></project>
//! ```
//!
//! The service has no notion of a present-but-empty reference, so a
//! reference with an empty identifier produces no element at all. In JSON a
//! user reference is the bare login, or `null` when empty; a project
//! reference is an object with its `name`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::api::xml::Element;

/// Encodes a reference as `<name attribute="value"></name>`.
///
/// Returns `None` when `value` is empty; the caller must then emit nothing.
pub fn encode_reference(name: &str, attribute: &str, value: &str) -> Option<Element> {
    if value.is_empty() {
        None
    } else {
        Some(Element::new(name).with_attribute(attribute, value))
    }
}

/// Reads the identifying attribute of a reference element.
///
/// A reference element without the attribute decodes to an empty identifier.
pub fn decode_reference(element: &Element, attribute: &str) -> String {
    element.attribute(attribute).unwrap_or_default().to_string()
}

/// A value that refers to another entity by an identifying string.
pub trait Reference {
    /// The attribute carrying the identifier on the wire.
    const ATTRIBUTE: &'static str;

    /// Builds a reference from its identifier.
    fn from_id(id: String) -> Self;

    /// Returns the identifier, empty when the reference is unset.
    fn id(&self) -> &str;

    /// Encodes the reference as an element called `name`.
    fn to_element(&self, name: &str) -> Option<Element> {
        encode_reference(name, Self::ATTRIBUTE, self.id())
    }
}

/// A user referred to by their login.
///
/// Used for group members, group maintainers and user owners.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UserRef {
    /// The user's login; empty means "no user".
    pub id: String,
}

/// A project referred to by its name.
///
/// Used for watchlist entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectRef {
    /// The project name; empty means "no project".
    #[serde(default)]
    pub name: String,
}

impl UserRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

impl ProjectRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

impl Reference for UserRef {
    const ATTRIBUTE: &'static str = "userid";

    fn from_id(id: String) -> Self {
        Self { id }
    }

    fn id(&self) -> &str {
        &self.id
    }
}

impl Reference for ProjectRef {
    const ATTRIBUTE: &'static str = "name";

    fn from_id(name: String) -> Self {
        Self { name }
    }

    fn id(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn serialize_reference<S: Serializer>(id: &str, serializer: S) -> Result<S::Ok, S::Error> {
    if id.is_empty() {
        serializer.serialize_none()
    } else {
        serializer.serialize_str(id)
    }
}

fn deserialize_reference<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Serialize for UserRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_reference(&self.id, serializer)
    }
}

impl<'de> Deserialize<'de> for UserRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_reference(deserializer).map(Self::from_id)
    }
}
