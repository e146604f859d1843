//
//  obs-api
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Output formatting for the `obs` command line tool:
//!
//! - **Text format**: name lists one per line, entities as `key: value` lines
//! - **JSON format**: pretty-printed JSON for scripting (`--json`)
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: Enum representing the available output formats
//! - [`OutputWriter`]: Main entry point for writing formatted output
//! - [`TextOutput`]: Trait for entities that can be rendered as text
//!
//! ## Example
//!
//! ```rust,ignore
//! use obs_api::output::{OutputFormat, OutputWriter};
//!
//! let writer = OutputWriter::new(OutputFormat::Text);
//! writer.write_list(&client.list_groups()?)?;
//! writer.write(&client.get_group("devs")?)?;
//! ```

mod json;

pub use json::*;

use std::io::{self, Write};

use serde::Serialize;

use crate::api::{Group, User};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Writes command results to standard output in the selected format.
#[derive(Debug, Clone, Copy)]
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes an entity to standard output.
    pub fn write<T: Serialize + TextOutput>(&self, value: &T) -> anyhow::Result<()> {
        self.write_to(&mut io::stdout().lock(), value)
    }

    /// Writes a list of names to standard output.
    pub fn write_list(&self, names: &[String]) -> anyhow::Result<()> {
        self.write_list_to(&mut io::stdout().lock(), names)
    }

    /// Writes an entity to `out`.
    pub fn write_to<W: Write + ?Sized, T: Serialize + TextOutput>(&self, out: &mut W, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json_to(out, value),
            OutputFormat::Text => {
                for (key, text) in value.text_fields() {
                    writeln!(out, "{key}: {text}")?;
                }
                Ok(())
            }
        }
    }

    /// Writes a list of names to `out`.
    pub fn write_list_to<W: Write + ?Sized>(&self, out: &mut W, names: &[String]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json_to(out, names),
            OutputFormat::Text => {
                for name in names {
                    writeln!(out, "{name}")?;
                }
                Ok(())
            }
        }
    }
}

/// Types that can be printed as `key: value` lines.
pub trait TextOutput {
    /// Returns the fields to print, in order. Empty values are omitted by
    /// the implementations.
    fn text_fields(&self) -> Vec<(&'static str, String)>;
}

fn push_field(fields: &mut Vec<(&'static str, String)>, key: &'static str, value: String) {
    if !value.is_empty() {
        fields.push((key, value));
    }
}

impl TextOutput for Group {
    fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("name", self.id.clone())];
        push_field(&mut fields, "email", self.email.clone());
        push_field(&mut fields, "maintainer", self.maintainer.to_string());
        let members: Vec<&str> = self.members.iter().map(|m| m.id.as_str()).collect();
        push_field(&mut fields, "members", members.join(", "));
        fields
    }
}

impl TextOutput for User {
    fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("username", self.id.clone())];
        push_field(&mut fields, "email", self.email.clone());
        push_field(&mut fields, "realname", self.realname.clone());
        push_field(&mut fields, "state", self.state.clone());
        push_field(&mut fields, "owner", self.owner.to_string());
        push_field(&mut fields, "globalrole", self.roles.join(", "));
        let watchlist: Vec<&str> = self.watchlist.iter().map(|p| p.name.as_str()).collect();
        push_field(&mut fields, "watchlist", watchlist.join(", "));
        fields
    }
}
