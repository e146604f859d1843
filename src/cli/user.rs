//
//  obs-api
//  cli/user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! User commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use super::GlobalOptions;

/// Manipulate users
#[derive(Args, Debug)]
pub struct UserCommand {
    #[command(subcommand)]
    pub command: UserSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UserSubcommand {
    /// List all users with username starting with PREFIX
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Get a user by username
    Get(UsernameArgs),

    /// Look a user up by email
    Lookup(LookupArgs),

    /// List the groups a user is a member of
    Groups(UsernameArgs),

    /// Lock a user and their projects
    Lock(UsernameArgs),

    /// Mark a user as deleted and delete their projects
    Delete(UsernameArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list users whose username starts with PREFIX
    pub prefix: Option<String>,
}

#[derive(Args, Debug)]
pub struct UsernameArgs {
    /// The username (login)
    pub username: String,
}

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Email address to look up
    pub email: String,
}

impl UserCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let output = global.output();

        match &self.command {
            UserSubcommand::List(args) => {
                let users = client
                    .list_users(args.prefix.as_deref().unwrap_or_default())
                    .context("failed to list users")?;
                output.write_list(&users)
            }
            UserSubcommand::Get(args) => {
                let user = client.get_user(&args.username).context("failed to retrieve user")?;
                output.write(&user)
            }
            UserSubcommand::Lookup(args) => {
                let user = client.get_user_by_email(&args.email).context("failed to look up user")?;
                output.write(&user)
            }
            UserSubcommand::Groups(args) => {
                let groups = client
                    .get_user_groups(&args.username)
                    .with_context(|| format!("failed to retrieve groups of user {}", args.username))?;
                output.write_list(&groups)
            }
            UserSubcommand::Lock(args) => client
                .lock_user(&args.username)
                .with_context(|| format!("failed to lock user {}", args.username)),
            UserSubcommand::Delete(args) => client
                .delete_user(&args.username)
                .with_context(|| format!("failed to delete user {}", args.username)),
        }
    }
}
