//
//  obs-api
//  api/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # User Endpoints
//!
//! OBS calls users "persons". A user document looks like:
//!
//! ```xml
//! <person>
//!   <login>alice</login>
//!   <email>alice@example.com</email>
//!   <realname>Alice</realname>
//!   <state>confirmed</state>
//!   <globalrole>Admin</globalrole>
//!   <watchlist>
//!     <project name="home:alice"/>
//!   </watchlist>
//! </person>
//! ```
//!
//! Sub-accounts additionally carry `<owner userid=".."/>`.

use serde::{Deserialize, Serialize};

use crate::api::client::{Client, Method};
use crate::api::common::{commands, Collection, Directory, ProjectRef, Reference, SearchOptions, UserOptions, UserRef};
use crate::api::error::{Error, Result};
use crate::api::predicate::build_predicate;
use crate::api::schema::{self, Field, FromXml, Schema, ToXml};
use crate::api::xml::{Element, XmlError};

/// A user account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The login name.
    #[serde(rename = "username")]
    pub id: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub realname: String,

    /// Account state, e.g. `confirmed`, `locked` or `deleted`.
    #[serde(default)]
    pub state: String,

    /// The owning user of a sub-account.
    #[serde(default, skip_serializing_if = "UserRef::is_empty")]
    pub owner: UserRef,

    /// Global roles, e.g. `Admin`.
    #[serde(rename = "globalrole", default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,

    /// Watched projects.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub watchlist: Vec<ProjectRef>,
}

const USER_SCHEMA: Schema<User> = Schema {
    root: "person",
    fields: &[
        Field::Text {
            element: "login",
            get: |u| u.id.as_str(),
            set: |u, v| u.id = v,
        },
        Field::OptionalText {
            element: "email",
            get: |u| u.email.as_str(),
            set: |u, v| u.email = v,
        },
        Field::OptionalText {
            element: "realname",
            get: |u| u.realname.as_str(),
            set: |u, v| u.realname = v,
        },
        Field::OptionalText {
            element: "state",
            get: |u| u.state.as_str(),
            set: |u, v| u.state = v,
        },
        Field::Reference {
            element: "owner",
            attribute: UserRef::ATTRIBUTE,
            get: |u| u.owner.id(),
            set: |u, v| u.owner = UserRef::from_id(v),
        },
        Field::Repeated {
            element: "globalrole",
            get: |u| u.roles.as_slice(),
            push: |u, v| u.roles.push(v),
        },
        Field::References {
            path: &["watchlist"],
            element: "project",
            attribute: ProjectRef::ATTRIBUTE,
            get: |u| u.watchlist.iter().map(Reference::id).collect(),
            push: |u, v| u.watchlist.push(ProjectRef::from_id(v)),
        },
    ],
};

impl ToXml for User {
    fn to_element(&self) -> Element {
        schema::encode(&USER_SCHEMA, self)
    }
}

impl FromXml for User {
    const ELEMENT: &'static str = USER_SCHEMA.root;

    fn from_element(element: &Element) -> std::result::Result<Self, XmlError> {
        schema::decode(&USER_SCHEMA, element)
    }
}

impl Client {
    /// Retrieves a user's details.
    pub fn get_user(&self, name: &str) -> Result<User> {
        let request = self.request(Method::GET, &format!("/person/{name}")).build()?;
        let (_, user) = self.send(request)?;
        Ok(user)
    }

    /// Lists the login names of all users, optionally only those starting
    /// with `prefix`.
    pub fn list_users(&self, prefix: &str) -> Result<Vec<String>> {
        let options = UserOptions {
            prefix: prefix.to_string(),
            ..Default::default()
        };
        let request = self.request(Method::GET, "/person").query(&options).build()?;
        let (_, directory): (_, Directory) = self.send(request)?;
        Ok(directory.entries)
    }

    /// Searches for users with the given email address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Predicate`] if `email` contains both quote
    /// characters, in addition to the usual request errors.
    pub fn get_users_by_email(&self, email: &str) -> Result<Vec<User>> {
        let options = SearchOptions {
            matcher: build_predicate("email", email)?,
        };
        let request = self.request(Method::GET, "/search/person").query(&options).build()?;
        let (_, results): (_, Collection<User>) = self.send(request)?;
        Ok(results.items)
    }

    /// Returns the only user with the given email address.
    ///
    /// # Errors
    ///
    /// - [`Error::NoUserWithEmail`] if nobody uses the address
    /// - [`Error::AmbiguousEmail`] if more than one user does
    pub fn get_user_by_email(&self, email: &str) -> Result<User> {
        let mut users = self.get_users_by_email(email)?;
        match users.len() {
            0 => Err(Error::NoUserWithEmail(email.to_string())),
            1 => Ok(users.remove(0)),
            count => Err(Error::AmbiguousEmail {
                count,
                email: email.to_string(),
            }),
        }
    }

    /// Locks a user and their projects.
    pub fn lock_user(&self, name: &str) -> Result<()> {
        self.user_command(name, commands::LOCK)
    }

    /// Marks a user as deleted and deletes their projects.
    pub fn delete_user(&self, name: &str) -> Result<()> {
        self.user_command(name, commands::DELETE)
    }

    /// Lists the names of the groups a user belongs to.
    pub fn get_user_groups(&self, name: &str) -> Result<Vec<String>> {
        let request = self.request(Method::GET, &format!("/person/{name}/group")).build()?;
        let (_, directory): (_, Directory) = self.send(request)?;
        Ok(directory.entries)
    }

    fn user_command(&self, name: &str, command: &str) -> Result<()> {
        let options = UserOptions {
            command: command.to_string(),
            ..Default::default()
        };
        let request = self
            .request(Method::POST, &format!("/person/{name}"))
            .query(&options)
            .build()?;
        self.execute(request)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: "alice".into(),
            email: "alice@example.com".into(),
            realname: "Alice Example".into(),
            state: "confirmed".into(),
            owner: UserRef::new("bob"),
            roles: vec!["Admin".into(), "Staff".into()],
            watchlist: vec![ProjectRef::new("home:alice"), ProjectRef::new("devel:tools")],
        }
    }

    #[test]
    fn test_minimal_user_body() {
        let xml = String::from_utf8(User::default().to_xml().unwrap()).unwrap();
        assert_eq!(xml, "<person><login></login><watchlist></watchlist></person>");
    }

    #[test]
    fn test_full_user_body() {
        let xml = String::from_utf8(sample_user().to_xml().unwrap()).unwrap();
        assert_eq!(
            xml,
            concat!(
                "<person><login>alice</login><email>alice@example.com</email>",
                "<realname>Alice Example</realname><state>confirmed</state>",
                r#"<owner userid="bob"></owner>"#,
                "<globalrole>Admin</globalrole><globalrole>Staff</globalrole>",
                r#"<watchlist><project name="home:alice"></project><project name="devel:tools"></project></watchlist>"#,
                "</person>"
            )
        );
    }

    #[test]
    fn test_user_round_trip() {
        for user in [User::default(), sample_user()] {
            assert_eq!(User::from_xml(&user.to_xml().unwrap()).unwrap(), user);
        }
    }

    #[test]
    fn test_user_round_trip_keeps_padding() {
        let user = User {
            id: "alice".into(),
            realname: " Alice Example ".into(),
            state: "\tconfirmed\n".into(),
            ..Default::default()
        };
        let xml = user.to_xml().unwrap();
        assert!(String::from_utf8_lossy(&xml).contains("<realname> Alice Example </realname>"));
        assert_eq!(User::from_xml(&xml).unwrap(), user);
    }

    #[test]
    fn test_user_json_omits_empty_optional_fields() {
        let user = User {
            id: "carol".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"username": "carol", "email": "", "realname": "", "state": ""})
        );
    }

    #[test]
    fn test_user_json_round_trip() {
        let user = sample_user();
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains(r#""globalrole":["Admin","Staff"]"#));
        assert!(json.contains(r#""owner":"bob""#));
        assert!(json.contains(r#""watchlist":[{"name":"home:alice"},{"name":"devel:tools"}]"#));
        assert_eq!(serde_json::from_str::<User>(&json).unwrap(), user);
    }

    #[test]
    fn test_directory_of_users() {
        let body = br#"<directory count="2"><entry name="alice"/><entry name="bob"/></directory>"#;
        assert_eq!(Directory::from_xml(body).unwrap().entries, vec!["alice", "bob"]);
    }
}
