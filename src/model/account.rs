//! Bank account records.

use serde::{Deserialize, Serialize};

/// Account product type. `Other` absorbs types the banking service may
/// introduce; it is not offered when opening an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Savings,
    Checking,
    #[serde(other)]
    #[value(skip)]
    Other,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "SAVINGS",
            AccountType::Checking => "CHECKING",
            AccountType::Other => "OTHER",
        }
    }
}

/// Account as returned by the banking service. Balances are display
/// mirrors; all arithmetic lives server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub account_number: String,
    pub balance: f64,
    pub account_type: AccountType,
    pub status: String,
    pub client_id: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
