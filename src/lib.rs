//
//  obs-api
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # OBS API Library
//!
//! A client for the XML API of the Open Build Service (OBS), covering user
//! and group administration, together with the `obs` command line tool
//! built on top of it.
//!
//! ## Features
//!
//! - **Groups**: list, fetch, create, update and delete groups, manage members
//! - **Users**: fetch and list users, look them up by email, lock and delete them
//! - **Typed XML**: entities are decoded from and encoded to the API's XML
//!   documents, with structured errors for non-success responses
//! - **Credentials**: HTTP Basic authentication, with passwords from the
//!   API URL or the system keyring
//!
//! ## Module Structure
//!
//! - [`api`]: The blocking API client and entity types
//! - [`auth`]: Credential resolution and keyring lookup
//! - [`config`]: Configuration file management
//! - [`output`]: Output formatting (text, JSON)
//! - [`cli`]: Command-line interface definitions using clap
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use obs_api::api::Client;
//!
//! let client = Client::builder()
//!     .credentials("admin", "secret")
//!     .build()?;
//!
//! let user = client.get_user_by_email("alice@example.com")?;
//! println!("{} is {}", user.id, user.realname);
//!
//! client.add_group_member("developers", &user.id)?;
//! # Ok::<(), obs_api::api::Error>(())
//! ```

/// The blocking OBS API client.
///
/// Handles request building, authentication, XML encoding and decoding,
/// and error classification. Group and user operations are methods on
/// [`api::Client`].
pub mod api;

/// Credential resolution.
///
/// Extracts Basic authentication credentials from API URLs and looks
/// passwords up in the system keyring.
pub mod auth;

/// Command-line interface definitions.
pub mod cli;

/// Configuration file management.
///
/// Manages the CLI's optional configuration stored in platform-specific locations:
/// - Linux: `~/.config/obs/config.toml`
/// - macOS: `~/Library/Application Support/obs/config.toml`
/// - Windows: `%APPDATA%\obs\config\config.toml`
pub mod config;

/// Output formatting for the CLI.
pub mod output;

pub use api::{Client, ClientBuilder, Error, Group, Result, User};
pub use cli::Cli;
pub use config::Config;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes and configuration paths.
pub const APP_NAME: &str = "obs";

/// Application version constant.
///
/// The current version of the crate, derived from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use obs_api::VERSION;
///
/// println!("obs version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// Any failure. The error is printed to stderr.
    pub const ERROR: i32 = 1;
}
