//! Command-line interface for the MicroBank platform.
//!
//! Subcommand groups:
//! - `login` / `logout` / `register` / `whoami` / `setup` - session management
//! - `dashboard` - account and activity overview
//! - `account` - list, open, balance and transact checks
//! - `tx` - deposits, withdrawals, transfers, history
//! - `report` - monthly financial summary
//! - `profile` - view and update the logged-in profile
//! - `admin` - client roster management (administrators)
//! - `audit` - audit trail and compliance reports (administrators)

pub mod accounts;
pub mod admin;
pub mod audit;
pub mod auth;
pub mod dashboard;
pub mod profile;
pub mod reports;
pub mod transactions;
pub mod validation;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::api::Services;
use crate::model::{parse_timestamp, AccountType, AuditAction, ClientStatus, TransactionType};
use crate::session::{Session, SessionUser};

/// CLI arguments structure
#[derive(Parser, Debug)]
#[command(name = "bankctl")]
#[command(author, version, about = "A command-line client for the MicroBank banking platform", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "bankctl.toml")]
    pub config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Base URL for all services (gateway deployments)
    #[arg(long, env = "BANKCTL_API_URL")]
    pub api_url: Option<String>,

    /// Session token override (can also be set via BANKCTL_TOKEN env var)
    #[arg(long, env = "BANKCTL_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        /// Email address of the account
        email: String,
        /// Password (can also be set via BANKCTL_PASSWORD env var)
        #[arg(long, env = "BANKCTL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Register a new client account
    Register {
        /// Email address for the new account
        email: String,
        /// Full name, quoted if it contains spaces
        #[arg(long)]
        name: String,
        /// Password (can also be set via BANKCTL_PASSWORD env var)
        #[arg(long, env = "BANKCTL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Repeat the password to confirm it
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Create the first administrator account on a fresh platform
    Setup {
        /// Email address for the administrator
        email: String,
        /// Full name, quoted if it contains spaces
        #[arg(long)]
        name: String,
        /// Password (can also be set via BANKCTL_PASSWORD env var)
        #[arg(long, env = "BANKCTL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Repeat the password to confirm it
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Log out and discard the stored session token
    Logout,

    /// Show the currently logged-in user
    Whoami,

    /// Overview of accounts and recent activity
    Dashboard,

    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Transaction commands
    #[command(subcommand)]
    Tx(TxCommands),

    /// Monthly financial summary of your accounts
    Report {
        /// Window in days for the monthly breakdown
        #[arg(long, default_value = "30")]
        days: i64,
    },

    /// Profile commands
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Client roster management (administrators only)
    #[command(subcommand)]
    Admin(AdminCommands),

    /// Audit trail and compliance reports (administrators only)
    #[command(subcommand)]
    Audit(AuditCommands),
}

/// Account subcommands
#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// List your accounts
    List,
    /// Open a new account
    Open {
        /// Kind of account to open
        #[arg(value_enum)]
        account_type: AccountType,
    },
    /// Show the current balance of an account
    Balance {
        /// Account ID
        account_id: i64,
    },
    /// Check whether an account is allowed to transact
    Check {
        /// Account ID
        account_id: i64,
    },
}

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TxCommands {
    /// List transactions with optional filters
    List {
        /// Restrict to a single account
        #[arg(long)]
        account: Option<i64>,
        /// Filter by transaction type
        #[arg(long = "type", value_enum)]
        tx_type: Option<TransactionType>,
        /// Only show transactions from the last N days
        #[arg(long, default_value = "30")]
        days: i64,
        /// Case-insensitive search over description, reference and type
        #[arg(long)]
        search: Option<String>,
    },
    /// Deposit into an account
    Deposit {
        /// Account ID
        account_id: i64,
        /// Amount in whole currency units, max two decimal places
        amount: f64,
        /// Free-form description stored with the transaction
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Withdraw from an account
    Withdraw {
        /// Account ID
        account_id: i64,
        /// Amount in whole currency units, max two decimal places
        amount: f64,
        /// Free-form description stored with the transaction
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Transfer between two accounts
    Transfer {
        /// Source account ID
        from_account: i64,
        /// Destination account ID
        to_account: i64,
        /// Amount in whole currency units, max two decimal places
        amount: f64,
        /// Free-form description stored with the transaction
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Show one transaction
    Show {
        /// Transaction ID
        transaction_id: i64,
    },
}

/// Profile subcommands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show your profile
    Show,
    /// Update profile fields
    Update {
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New email address
        #[arg(long)]
        email: Option<String>,
        /// New phone number
        #[arg(long)]
        phone: Option<String>,
    },
}

/// Admin subcommands
#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// List all clients
    Clients,
    /// Show one client
    Client {
        /// Client ID
        client_id: i64,
    },
    /// Search clients by name or email
    Search {
        /// Search term
        query: String,
    },
    /// Blacklist a client
    Blacklist {
        /// Client ID
        client_id: i64,
        /// Reason recorded on the client record
        #[arg(long)]
        reason: String,
    },
    /// Remove a client from the blacklist
    Unblacklist {
        /// Client ID
        client_id: i64,
    },
    /// Set a client's lifecycle status
    Status {
        /// Client ID
        client_id: i64,
        /// New status
        #[arg(value_enum)]
        status: ClientStatus,
    },
    /// Client statistics
    Stats,
}

/// Audit subcommands
#[derive(Subcommand, Debug)]
pub enum AuditCommands {
    /// List audit logs, newest first
    List {
        /// Zero-based page number
        #[arg(long, default_value = "0")]
        page: u32,
        /// Page size
        #[arg(long, default_value = "20")]
        size: u32,
    },
    /// Search audit logs with filters
    Search {
        /// Free-text search term
        #[arg(long)]
        term: Option<String>,
        /// Filter by entity type (e.g. CLIENT, ACCOUNT, TRANSACTION)
        #[arg(long)]
        entity_type: Option<String>,
        /// Filter by action
        #[arg(long, value_enum)]
        action: Option<AuditAction>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Zero-based page number
        #[arg(long, default_value = "0")]
        page: u32,
        /// Page size
        #[arg(long, default_value = "20")]
        size: u32,
    },
    /// Most recent audit activity
    Recent,
    /// Security-relevant events
    Security {
        /// Zero-based page number
        #[arg(long, default_value = "0")]
        page: u32,
        /// Page size
        #[arg(long, default_value = "20")]
        size: u32,
    },
    /// Failed operations
    Failed {
        /// Zero-based page number
        #[arg(long, default_value = "0")]
        page: u32,
        /// Page size
        #[arg(long, default_value = "20")]
        size: u32,
    },
    /// Aggregate statistics, optionally for a date window
    Stats {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Export audit logs as CSV
    Export {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: String,
        /// Output file (default: audit_logs_<today>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compliance reports
    #[command(subcommand)]
    Report(AuditReportCommands),
}

/// Audit report subcommands
#[derive(Subcommand, Debug)]
pub enum AuditReportCommands {
    /// Compliance report for an explicit date window
    Compliance {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: String,
    },
    /// Summary of the last 24 hours
    Daily,
    /// Security events over the last 30 days
    Security,
}

impl Commands {
    /// Whether the command operates on an established session. Login,
    /// registration, setup and logout work without one.
    pub fn needs_session(&self) -> bool {
        !matches!(
            self,
            Commands::Login { .. }
                | Commands::Register { .. }
                | Commands::Setup { .. }
                | Commands::Logout
        )
    }
}

/// Run a CLI command
pub async fn run_command(cli: &Cli, services: &Services, session: &mut Session) -> Result<()> {
    match &cli.command {
        Commands::Login { email, password } => {
            auth::cmd_login(services, session, email, password.as_deref()).await
        }
        Commands::Register {
            email,
            name,
            password,
            confirm_password,
        } => {
            auth::cmd_register(services, email, name, password.as_deref(), confirm_password.as_deref())
                .await
        }
        Commands::Setup {
            email,
            name,
            password,
            confirm_password,
        } => {
            auth::cmd_setup(services, email, name, password.as_deref(), confirm_password.as_deref())
                .await
        }
        Commands::Logout => auth::cmd_logout(session),
        Commands::Whoami => auth::cmd_whoami(require_user(session)?),
        Commands::Dashboard => dashboard::cmd_dashboard(services, require_user(session)?).await,
        Commands::Account(command) => {
            accounts::run(services, require_client(session)?, command).await
        }
        Commands::Tx(command) => {
            transactions::run(services, require_client(session)?, command).await
        }
        Commands::Report { days } => {
            reports::cmd_report(services, require_client(session)?, *days).await
        }
        Commands::Profile(command) => {
            require_user(session)?;
            profile::run(services, command).await
        }
        Commands::Admin(command) => {
            require_admin(session)?;
            admin::run(services, command).await
        }
        Commands::Audit(command) => {
            require_admin(session)?;
            audit::run(services, command).await
        }
    }
}

fn require_user(session: &Session) -> Result<&SessionUser> {
    session.user().ok_or_else(|| {
        anyhow::anyhow!("You are not logged in. Run 'bankctl login <email>' first.")
    })
}

/// Banking commands only make sense for client accounts. Administrators
/// manage the platform but do not hold accounts of their own.
fn require_client(session: &Session) -> Result<&SessionUser> {
    let user = require_user(session)?;
    if user.is_admin() {
        anyhow::bail!("Administrator accounts do not hold banking accounts.");
    }
    Ok(user)
}

fn require_admin(session: &Session) -> Result<&SessionUser> {
    let user = require_user(session)?;
    if !user.is_admin() {
        anyhow::bail!("This command requires administrator access.");
    }
    Ok(user)
}

// ============================================================================
// Output helpers
// ============================================================================

/// Format a money amount as dollars with thousands separators.
pub(crate) fn format_amount(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}${}.{:02}", sign, grouped, fraction)
}

/// Render a service timestamp in local table form, falling back to the raw
/// string when it does not parse.
pub(crate) fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        None => raw.to_string(),
    }
}

/// Truncate a string to max length with ellipsis
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
