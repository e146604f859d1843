//
//  obs-api
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! Types shared between the group and user endpoints:
//!
//! - [`UserRef`] / [`ProjectRef`] - references to other entities by name
//! - [`Directory`] - the envelope of "list of names" endpoints
//! - [`Collection`] - the envelope of search results
//! - [`UserOptions`] / [`SearchOptions`] - query parameters
//! - [`commands`] - the `cmd` keywords understood by POST endpoints
//!
//! # Wire Formats
//!
//! ```text
//! <directory count="3">
//!   <entry name="foo"/>
//!   <entry name="bar"/>
//! </directory>
//!
//! <collection matches="1">
//!   <person>...</person>
//! </collection>
//! ```

use serde::Serialize;

use crate::api::schema::{self, expect_root, Field, FromXml, Schema, ToXml};
use crate::api::xml::{Element, XmlError};

mod reference;

pub use reference::*;

/// `cmd` keywords for POST endpoints.
pub mod commands {
    /// Add a user to a group.
    pub const ADD_USER: &str = "add_user";
    /// Remove a user from a group.
    pub const REMOVE_USER: &str = "remove_user";
    /// Set the email address of a group.
    pub const SET_EMAIL: &str = "set_email";
    /// Lock a user and their projects.
    pub const LOCK: &str = "lock";
    /// Mark a user as deleted and delete their projects.
    pub const DELETE: &str = "delete";
}

/// A list of entry names, as returned by `/group`, `/person` and
/// `/person/{name}/group`.
///
/// Only the `name` attribute of each entry is kept; other attributes on the
/// entries or the envelope (such as `count`) are discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    /// Entry names in document order.
    pub entries: Vec<String>,
}

const DIRECTORY_SCHEMA: Schema<Directory> = Schema {
    root: "directory",
    fields: &[Field::References {
        path: &[],
        element: "entry",
        attribute: "name",
        get: |d| d.entries.iter().map(String::as_str).collect(),
        push: |d, v| d.entries.push(v),
    }],
};

impl ToXml for Directory {
    fn to_element(&self) -> Element {
        schema::encode(&DIRECTORY_SCHEMA, self)
    }
}

impl FromXml for Directory {
    const ELEMENT: &'static str = DIRECTORY_SCHEMA.root;

    fn from_element(element: &Element) -> Result<Self, XmlError> {
        schema::decode(&DIRECTORY_SCHEMA, element)
    }
}

/// Search results: every child element named after `T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<T> {
    /// Matching items in document order.
    pub items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: FromXml> FromXml for Collection<T> {
    const ELEMENT: &'static str = "collection";

    fn from_element(element: &Element) -> Result<Self, XmlError> {
        expect_root(element, Self::ELEMENT)?;
        let items = element
            .children_named(T::ELEMENT)
            .map(T::from_element)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { items })
    }
}

/// Query parameters for user and group commands.
///
/// Empty fields are left out of the query string.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserOptions {
    #[serde(rename = "cmd", skip_serializing_if = "String::is_empty")]
    pub command: String,

    #[serde(rename = "userid", skip_serializing_if = "String::is_empty")]
    pub user: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub prefix: String,
}

/// Query parameters for `/search/*` endpoints.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchOptions {
    /// An XPath predicate, see [`crate::api::predicate`].
    #[serde(rename = "match", skip_serializing_if = "String::is_empty")]
    pub matcher: String,
}
