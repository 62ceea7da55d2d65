//! Login session state for the CLI.
//!
//! The session token lives in a plain file between invocations. On startup
//! the stored token is validated against the auth service; a rejected token
//! is discarded so the next command starts logged out instead of failing
//! every request.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::api::AuthApi;
use crate::model::{ClientRecord, LoginResponse, Role};

/// Where the session token is persisted. An overlay token (from a flag or
/// environment variable) takes precedence over the file without touching it.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
    overlay: Option<String>,
}

impl TokenStore {
    pub fn new(path: PathBuf) -> Self {
        TokenStore {
            path,
            overlay: None,
        }
    }

    pub fn with_overlay(path: PathBuf, overlay: Option<String>) -> Self {
        TokenStore { path, overlay }
    }

    #[cfg(test)]
    pub fn in_memory(token: Option<String>) -> Self {
        TokenStore {
            path: PathBuf::new(),
            overlay: token,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current token, if any. The overlay wins over the file.
    pub fn load(&self) -> Option<String> {
        if let Some(token) = &self.overlay {
            return Some(token.clone());
        }
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(_) => None,
        }
    }

    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create token directory {}", parent.display())
            })?;
        }
        fs::write(&self.path, token)
            .with_context(|| format!("Failed to write token file {}", self.path.display()))?;
        Ok(())
    }

    /// Remove the stored token. Already-absent files are fine.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err)
                .with_context(|| format!("Failed to remove token file {}", self.path.display())),
        }
    }
}

/// The logged-in client, derived from their profile record.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: Role,
    pub blacklisted: bool,
    pub status: String,
}

impl SessionUser {
    pub fn from_record(record: &ClientRecord) -> Self {
        let (first_name, last_name) = split_name(&record.name);
        SessionUser {
            id: record.id,
            email: record.email.clone(),
            first_name,
            last_name,
            phone: record.phone.clone().unwrap_or_default(),
            role: record.role.unwrap_or_default(),
            blacklisted: record.blacklisted,
            status: record.status.clone(),
        }
    }

    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Split a display name into first and last name. The first whitespace
/// separates the two; everything after it is the last name.
pub fn split_name(name: &str) -> (String, String) {
    let trimmed = name.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_string(), rest.trim_start().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}

/// Session state for one CLI invocation.
pub struct Session {
    store: TokenStore,
    user: Option<SessionUser>,
}

impl Session {
    pub fn new(store: TokenStore) -> Self {
        Session { store, user: None }
    }

    #[cfg(test)]
    pub fn with_user(store: TokenStore, user: SessionUser) -> Self {
        Session {
            store,
            user: Some(user),
        }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|user| user.is_admin())
    }

    /// Validate the stored token by fetching the profile behind it. A token
    /// the service rejects is cleared; the command then runs logged out.
    /// Restore never fails the command itself.
    pub async fn restore(&mut self, auth: &AuthApi) {
        if self.store.load().is_none() {
            return;
        }
        match auth.profile().await {
            Ok(record) => {
                self.user = Some(SessionUser::from_record(&record));
            }
            Err(err) => {
                tracing::debug!("Stored session token rejected: {}", err);
                if let Err(err) = self.store.clear() {
                    tracing::warn!("Failed to clear stored token: {}", err);
                }
            }
        }
    }

    /// Persist a successful login and adopt its client as the session user.
    pub fn establish(&mut self, response: &LoginResponse) -> Result<SessionUser> {
        self.store
            .save(&response.token)
            .context("Failed to store session token")?;
        let user = SessionUser::from_record(&response.client);
        self.user = Some(user.clone());
        Ok(user)
    }

    /// Drop the session and its stored token. Logging out while logged out
    /// is not an error.
    pub fn logout(&mut self) -> Result<()> {
        self.user = None;
        self.store.clear()
    }
}
