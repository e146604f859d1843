//
//  obs-api
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod group;
mod user;

pub use group::GroupCommand;
pub use user::UserCommand;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use url::Url;

use crate::api::Client;
use crate::auth::{resolve_credentials, KeyringStore, SecretStore};
use crate::config::Config;
use crate::output::{OutputFormat, OutputWriter};

/// obs - Administer Open Build Service users and groups
#[derive(Parser, Debug)]
#[command(
    name = "obs",
    version,
    about = "OBS API command-line client",
    long_about = "obs manages users and groups of an Open Build Service instance\n\
                  through its XML API.",
    propagate_version = true,
    after_help = "Use 'obs <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// OBS API URL, optionally including USER[:PASSWORD]@
    #[arg(long, global = true, env = "OBS_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Do not look passwords up in the system keyring
    #[arg(long, global = true)]
    pub no_keyring: bool,

    /// Skip TLS certificate verification
    #[arg(long, global = true, env = "OBS_INSECURE")]
    pub insecure: bool,

    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file to use instead of the default one
    #[arg(long, global = true, env = "OBS_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    /// Loads the configuration file selected by `--config`, or the default one.
    pub fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    /// Builds an API client from the flags and the configuration file.
    pub fn client(&self) -> Result<Client> {
        let config = self.load_config()?;

        let api_url = self.api_url.as_deref().unwrap_or_else(|| config.api_url());
        let mut url = Url::parse(api_url).with_context(|| format!("invalid API URL '{api_url}'"))?;

        let keyring = KeyringStore::new();
        let store: Option<&dyn SecretStore> = if !self.no_keyring && config.use_keyring() {
            Some(&keyring)
        } else {
            None
        };
        let credentials = resolve_credentials(&mut url, store)?;

        Client::builder()
            .base_url(url.as_str())
            .credentials(credentials.username, credentials.password)
            .insecure_skip_verify(self.insecure || config.insecure)
            .build()
            .context("failed to create client")
    }

    pub fn output(&self) -> OutputWriter {
        if self.json {
            OutputWriter::new(OutputFormat::Json)
        } else {
            OutputWriter::new(OutputFormat::Text)
        }
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manipulate users
    User(UserCommand),

    /// Manipulate groups
    Group(GroupCommand),

    /// Print version information
    Version,
}
