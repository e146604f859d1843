//
//  obs-api
//  api/groups.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Group endpoints.
//!
//! ```xml
//! <group>
//!   <title>developers</title>
//!   <email>devs@example.com</email>
//!   <maintainer userid="alice"/>
//!   <person>
//!     <person userid="alice"/>
//!     <person userid="bob"/>
//!   </person>
//! </group>
//! ```

use serde::{Deserialize, Serialize};

use crate::api::client::{Client, Method};
use crate::api::common::{commands, Directory, Reference, UserOptions, UserRef};
use crate::api::error::Result;
use crate::api::schema::{self, Field, FromXml, Schema, ToXml};
use crate::api::xml::{Element, XmlError};

/// A named group of users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// The group name (`title` on the wire).
    #[serde(rename = "name")]
    pub id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,

    #[serde(default)]
    pub maintainer: UserRef,

    #[serde(default)]
    pub members: Vec<UserRef>,
}

impl Group {
    /// Creates an empty group called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: name.into(),
            ..Default::default()
        }
    }
}

const GROUP_SCHEMA: Schema<Group> = Schema {
    root: "group",
    fields: &[
        Field::Text {
            element: "title",
            get: |g| g.id.as_str(),
            set: |g, v| g.id = v,
        },
        Field::OptionalText {
            element: "email",
            get: |g| g.email.as_str(),
            set: |g, v| g.email = v,
        },
        Field::Reference {
            element: "maintainer",
            attribute: UserRef::ATTRIBUTE,
            get: |g| g.maintainer.id(),
            set: |g, v| g.maintainer = UserRef::from_id(v),
        },
        Field::References {
            path: &["person"],
            element: "person",
            attribute: UserRef::ATTRIBUTE,
            get: |g| g.members.iter().map(Reference::id).collect(),
            push: |g, v| g.members.push(UserRef::from_id(v)),
        },
    ],
};

impl ToXml for Group {
    fn to_element(&self) -> Element {
        schema::encode(&GROUP_SCHEMA, self)
    }
}

impl FromXml for Group {
    const ELEMENT: &'static str = GROUP_SCHEMA.root;

    fn from_element(element: &Element) -> std::result::Result<Self, XmlError> {
        schema::decode(&GROUP_SCHEMA, element)
    }
}

impl Client {
    /// Lists the names of all groups.
    ///
    /// Use [`Client::get_group`] to retrieve the details of each group.
    pub fn list_groups(&self) -> Result<Vec<String>> {
        let request = self.request(Method::GET, "/group").build()?;
        let (_, directory): (_, Directory) = self.send(request)?;
        Ok(directory.entries)
    }

    /// Retrieves a group with its maintainer and members.
    pub fn get_group(&self, name: &str) -> Result<Group> {
        let request = self.request(Method::GET, &format!("/group/{name}")).build()?;
        let (_, group) = self.send(request)?;
        Ok(group)
    }

    /// Creates a new empty group.
    pub fn new_group(&self, name: &str) -> Result<()> {
        let request = self
            .request(Method::PUT, &format!("/group/{name}"))
            .xml(&Group::new(name))
            .build()?;
        self.execute(request)?;
        Ok(())
    }

    /// Replaces a group with `group`, addressed by its `id`.
    ///
    /// The caller needs the rights to modify the group.
    pub fn update_group(&self, group: &Group) -> Result<()> {
        let request = self
            .request(Method::PUT, &format!("/group/{}", group.id))
            .xml(group)
            .build()?;
        self.execute(request)?;
        Ok(())
    }

    /// Deletes a group.
    ///
    /// Some OBS versions refuse to delete a group that still has members.
    pub fn delete_group(&self, name: &str) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("/group/{name}")).build()?;
        self.execute(request)?;
        Ok(())
    }

    /// Adds `user` to `group`.
    pub fn add_group_member(&self, group: &str, user: &str) -> Result<()> {
        self.group_command(group, UserOptions {
            command: commands::ADD_USER.to_string(),
            user: user.to_string(),
            ..Default::default()
        })
    }

    /// Removes `user` from `group`.
    pub fn remove_group_member(&self, group: &str, user: &str) -> Result<()> {
        self.group_command(group, UserOptions {
            command: commands::REMOVE_USER.to_string(),
            user: user.to_string(),
            ..Default::default()
        })
    }

    /// Sets the email address of `group`.
    pub fn set_group_email(&self, group: &str, email: &str) -> Result<()> {
        self.group_command(group, UserOptions {
            command: commands::SET_EMAIL.to_string(),
            email: email.to_string(),
            ..Default::default()
        })
    }

    fn group_command(&self, group: &str, options: UserOptions) -> Result<()> {
        let request = self
            .request(Method::POST, &format!("/group/{group}"))
            .query(&options)
            .build()?;
        self.execute(request)?;
        Ok(())
    }
}
