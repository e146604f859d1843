//
//  obs-api
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # System Keyring Lookup
//!
//! Passwords are read from the platform's native secure storage:
//!
//! - **macOS**: Keychain Services
//! - **Linux**: Secret Service API (GNOME Keyring, KWallet)
//! - **Windows**: Windows Credential Manager
//!
//! ## Storage Model
//!
//! - **Service**: the API host, including the port when one is given
//!   (`api.opensuse.org`, `obs.example.com:8443`)
//! - **Username**: the OBS login
//! - **Password**: the OBS password
//!
//! Entries are expected to be created with the platform's own tools, e.g.
//! `secret-tool store --label=OBS service api.opensuse.org username alice`.

use anyhow::Result;
use ::keyring::Entry;

/// A source of stored passwords, keyed by service and user.
pub trait SecretStore {
    /// Returns the stored password, or `None` if there is no entry.
    fn password(&self, service: &str, user: &str) -> Result<Option<String>>;
}

/// Password lookup in the system keyring.
///
/// No keyring access happens until [`SecretStore::password`] is called.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyringStore;

impl KeyringStore {
    pub fn new() -> Self {
        Self
    }
}

impl SecretStore for KeyringStore {
    fn password(&self, service: &str, user: &str) -> Result<Option<String>> {
        let entry = Entry::new(service, user)?;
        match entry.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(::keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
