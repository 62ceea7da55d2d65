//! Client (customer) records, auth payloads, and admin roster types.

use serde::{Deserialize, Serialize};

/// Role attached to a client record. The server omits the field for
/// ordinary clients created before roles existed, so deserialization
/// callers treat a missing role as `Client`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Client,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "CLIENT",
            Role::Admin => "ADMIN",
        }
    }
}

/// Lifecycle status of a client account, as the admin console sets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientStatus {
    Active,
    Inactive,
    Suspended,
}

impl ClientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Active => "ACTIVE",
            ClientStatus::Inactive => "INACTIVE",
            ClientStatus::Suspended => "SUSPENDED",
        }
    }
}

/// Client record as returned by login, registration, and profile calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub blacklisted: bool,
    #[serde(default)]
    pub blacklist_reason: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_status() -> String {
    "ACTIVE".to_string()
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login payload. `expires_in` is seconds until the token lapses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub client: ClientRecord,
    #[serde(default)]
    pub expires_in: i64,
}

/// Body for registration, the first-admin bootstrap, and admin-side profile
/// updates. All three endpoints share the shape.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Body for the authenticated profile update.
#[derive(Debug, Serialize)]
pub struct ProfileUpdateRequest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Roster entry from the admin endpoints. Unlike [`ClientRecord`], the
/// roster splits the display name server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminClient {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub status: String,
    pub blacklisted: bool,
    #[serde(default)]
    pub blacklist_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BlacklistRequest {
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateStatusRequest {
    pub status: ClientStatus,
}

/// Aggregate client counts for the admin overview.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientStatistics {
    pub total_clients: i64,
    pub active_clients: i64,
    pub blacklisted_clients: i64,
    #[serde(default)]
    pub inactive_clients: i64,
    pub suspended_clients: i64,
}
