//
//  obs-api
//  cli/group.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Group commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::api::Client;
use crate::output::OutputWriter;

use super::GlobalOptions;

/// Manipulate groups
#[derive(Args, Debug)]
pub struct GroupCommand {
    #[command(subcommand)]
    pub command: GroupSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum GroupSubcommand {
    /// List all groups
    #[command(visible_alias = "ls")]
    List,

    /// Create a new group
    New(NameArgs),

    /// Get a group by its name
    Get(NameArgs),

    /// Delete a group, removing its members first
    Delete(NameArgs),

    /// Add a user to a group
    Add(MemberArgs),

    /// Remove a user from a group
    Remove(MemberArgs),

    /// Set the email address of a group
    SetEmail(EmailArgs),
}

#[derive(Args, Debug)]
pub struct NameArgs {
    /// Group name
    pub name: String,
}

#[derive(Args, Debug)]
pub struct MemberArgs {
    /// Username to add or remove
    pub user: String,

    /// Group name
    pub group: String,
}

#[derive(Args, Debug)]
pub struct EmailArgs {
    /// Group name
    pub group: String,

    /// New email address
    pub email: String,
}

impl GroupCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let output = global.output();

        match &self.command {
            GroupSubcommand::List => {
                let groups = client.list_groups().context("failed to retrieve groups")?;
                output.write_list(&groups)
            }
            GroupSubcommand::New(args) => self.create(&client, &output, &args.name),
            GroupSubcommand::Get(args) => {
                let group = client.get_group(&args.name).context("failed to retrieve group")?;
                output.write(&group)
            }
            GroupSubcommand::Delete(args) => self.delete(&client, &args.name),
            GroupSubcommand::Add(args) => client
                .add_group_member(&args.group, &args.user)
                .with_context(|| format!("failed to add user {} to group {}", args.user, args.group)),
            GroupSubcommand::Remove(args) => client
                .remove_group_member(&args.group, &args.user)
                .with_context(|| format!("failed to remove user {} from group {}", args.user, args.group)),
            GroupSubcommand::SetEmail(args) => client
                .set_group_email(&args.group, &args.email)
                .with_context(|| format!("failed to set email of group {}", args.group)),
        }
    }

    fn create(&self, client: &Client, output: &OutputWriter, name: &str) -> Result<()> {
        client.new_group(name).context("failed to create group")?;
        let group = client
            .get_group(name)
            .context("failed to retrieve group after its creation")?;
        output.write(&group)
    }

    /// Some OBS versions only delete empty groups, so the members are
    /// removed with an update first.
    fn delete(&self, client: &Client, name: &str) -> Result<()> {
        let mut group = client.get_group(name).context("failed to retrieve group")?;

        group.members.clear();
        client
            .update_group(&group)
            .context("failed to remove users from group")?;

        client.delete_group(name).context("failed to delete group")
    }
}
