//
//  obs-api
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides a blocking client for the Open Build Service XML API,
//! covering user and group administration.
//!
//! ## Architecture
//!
//! The API layer is organized as follows:
//!
//! - [`client`]: Request building, authentication and the send pipeline
//! - [`error`]: Error types and response status classification
//! - [`xml`]: Owned XML element tree backed by `quick-xml`
//! - [`schema`]: Declarative mapping between entities and elements
//! - [`predicate`]: Quoting-safe XPath predicates for searches
//! - [`common`]: Shared types (references, directory listings, query options)
//!
//! Group and user operations are implemented as methods on [`Client`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use obs_api::api::Client;
//!
//! let client = Client::builder()
//!     .base_url("https://api.opensuse.org")
//!     .credentials("alice", "secret")
//!     .build()?;
//!
//! for name in client.list_groups()? {
//!     let group = client.get_group(&name)?;
//!     println!("{}: {} members", group.id, group.members.len());
//! }
//! # Ok::<(), obs_api::api::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result`]. Non-success responses become
//! [`Error::Api`], carrying the decoded `status` document:
//!
//! - `code`: machine-readable error code such as `unknown_group`
//! - `message`: the summary text
//! - `status` / `headers`: the HTTP response metadata

pub mod client;
pub mod common;
pub mod error;
mod groups;
pub mod predicate;
pub mod schema;
mod users;
pub mod xml;

pub use client::{Client, ClientBuilder, Method, Request, RequestBuilder, Response, StatusCode};
pub use common::{Directory, ProjectRef, UserRef};
pub use error::{Error, ErrorResponse, Result};
pub use groups::Group;
pub use users::User;
